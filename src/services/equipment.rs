//! Equipment service

use rand::Rng;
use validator::Validate;

use crate::{
    error::AppResult,
    models::equipment::{CreateEquipment, Equipment, EquipmentQuery, EquipmentShort, UpdateEquipment},
    repository::{equipment::NewEquipment, Repository},
};

const PUBLIC_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const PUBLIC_ID_LENGTH: usize = 8;

/// Random 8-character base-36 public identifier
pub fn generate_public_id() -> String {
    let mut rng = rand::thread_rng();
    (0..PUBLIC_ID_LENGTH)
        .map(|_| PUBLIC_ID_ALPHABET[rng.gen_range(0..PUBLIC_ID_ALPHABET.len())] as char)
        .collect()
}

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<(Vec<EquipmentShort>, i64)> {
        query.validate()?;
        tracing::debug!(
            search = ?query.search_term(),
            order_by = ?query.order_by(),
            page = query.page(),
            "Listing equipments"
        );
        self.repository.equipment.list(query).await
    }

    pub async fn get_by_public_id(&self, public_id: &str) -> AppResult<Equipment> {
        self.repository.equipment.get_by_public_id(public_id).await
    }

    /// Validate and insert a new equipment
    pub async fn create(&self, data: CreateEquipment) -> AppResult<Equipment> {
        data.validate()?;

        let new = NewEquipment {
            public_id: data.public_id.unwrap_or_else(generate_public_id),
            name: data.name,
            modelo: data.modelo,
            num_serie: data.num_serie,
            marca: data.marca,
            loja: data.loja,
            setor: data.setor,
            endereco: data.endereco,
            compressor: data.compressor,
            controlador: data.controlador,
            refrigerante: data.refrigerante,
            status: data.status,
            observacoes: data.observacoes,
        };

        let equipment = self.repository.equipment.create(&new).await?;
        tracing::info!(public_id = %equipment.public_id, id = %equipment.id, "Equipment created");
        Ok(equipment)
    }

    /// Validate and apply a partial update
    pub async fn update(&self, public_id: &str, data: &UpdateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        let equipment = self.repository.equipment.update(public_id, data).await?;
        tracing::info!(public_id = %public_id, "Equipment updated");
        Ok(equipment)
    }

    /// Check the database is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.equipment.ping().await
    }
}
