//! Equipment repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        Equipment, EquipmentQuery, EquipmentShort, EquipmentStatus, OrderBy, UpdateEquipment,
        PAGE_SIZE,
    },
};

/// Insert payload once the public id and status are resolved
#[derive(Debug, Clone)]
pub struct NewEquipment {
    pub public_id: String,
    pub name: String,
    pub modelo: String,
    pub num_serie: String,
    pub marca: String,
    pub loja: String,
    pub setor: String,
    pub endereco: String,
    pub compressor: String,
    pub controlador: String,
    pub refrigerante: String,
    pub status: EquipmentStatus,
    pub observacoes: Option<String>,
}

/// Escape LIKE metacharacters so the term matches literally
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// WHERE conditions shared by the page query and the count query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentFilter {
    name_pattern: Option<String>,
}

impl EquipmentFilter {
    pub fn from_query(query: &EquipmentQuery) -> Self {
        Self {
            name_pattern: query.search_term().map(like_pattern),
        }
    }

    /// WHERE clause, empty when unfiltered
    pub fn where_clause(&self) -> String {
        let mut conditions = Vec::new();

        if self.name_pattern.is_some() {
            conditions.push(format!("name ILIKE ${} ESCAPE '\\'", conditions.len() + 1));
        }

        if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        }
    }

    /// Values to bind, in placeholder order
    pub fn binds(&self) -> Vec<&str> {
        self.name_pattern.iter().map(String::as_str).collect()
    }
}

/// Page query for the given filter and order
pub fn page_sql(filter: &EquipmentFilter, order: OrderBy, offset: i64) -> String {
    format!(
        "SELECT id, public_id, name, status FROM equipments {} ORDER BY {} LIMIT {} OFFSET {}",
        filter.where_clause(),
        order.order_clause(),
        PAGE_SIZE,
        offset
    )
}

/// Count query for the given filter
pub fn count_sql(filter: &EquipmentFilter) -> String {
    format!("SELECT COUNT(*) FROM equipments {}", filter.where_clause())
}

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List one page of equipments with the total number of matches
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<(Vec<EquipmentShort>, i64)> {
        let filter = EquipmentFilter::from_query(query);

        let select_q = page_sql(&filter, query.order_by(), query.offset());
        let mut builder = sqlx::query_as::<_, EquipmentShort>(&select_q);
        for value in filter.binds() {
            builder = builder.bind(value);
        }

        let count_q = count_sql(&filter);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_q);
        for value in filter.binds() {
            count_builder = count_builder.bind(value);
        }

        let (rows, total) = tokio::try_join!(
            builder.fetch_all(&self.pool),
            count_builder.fetch_one(&self.pool),
        )?;
        Ok((rows, total))
    }

    /// Get equipment by public id
    pub async fn get_by_public_id(&self, public_id: &str) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipments WHERE public_id = $1")
            .bind(public_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", public_id)))
    }

    /// Create equipment
    pub async fn create(&self, data: &NewEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipments (
                public_id, name, modelo, num_serie, marca,
                loja, setor, endereco,
                compressor, controlador, refrigerante,
                status, observacoes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(&data.public_id)
        .bind(&data.name)
        .bind(&data.modelo)
        .bind(&data.num_serie)
        .bind(&data.marca)
        .bind(&data.loja)
        .bind(&data.setor)
        .bind(&data.endereco)
        .bind(&data.compressor)
        .bind(&data.controlador)
        .bind(&data.refrigerante)
        .bind(data.status)
        .bind(&data.observacoes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Apply a partial update to the equipment with the given public id
    pub async fn update(&self, public_id: &str, data: &UpdateEquipment) -> AppResult<Equipment> {
        let query = update_sql(data);

        let now = Utc::now();
        let mut builder = sqlx::query_as::<_, Equipment>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.modelo);
        bind_field!(data.num_serie);
        bind_field!(data.marca);
        bind_field!(data.loja);
        bind_field!(data.setor);
        bind_field!(data.endereco);
        bind_field!(data.compressor);
        bind_field!(data.controlador);
        bind_field!(data.refrigerante);
        bind_field!(data.status);
        // Some(None) binds NULL
        bind_field!(data.observacoes);

        builder
            .bind(public_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", public_id)))
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// UPDATE statement touching only the supplied fields; `modif_date` is `$1`
/// and the public id is the last placeholder
pub fn update_sql(data: &UpdateEquipment) -> String {
    let mut sets = vec!["modif_date = $1".to_string()];
    let mut idx = 2;

    macro_rules! add_field {
        ($field:expr, $name:expr) => {
            if $field.is_some() {
                sets.push(format!("{} = ${}", $name, idx));
                idx += 1;
            }
        };
    }

    add_field!(data.name, "name");
    add_field!(data.modelo, "modelo");
    add_field!(data.num_serie, "num_serie");
    add_field!(data.marca, "marca");
    add_field!(data.loja, "loja");
    add_field!(data.setor, "setor");
    add_field!(data.endereco, "endereco");
    add_field!(data.compressor, "compressor");
    add_field!(data.controlador, "controlador");
    add_field!(data.refrigerante, "refrigerante");
    add_field!(data.status, "status");
    add_field!(data.observacoes, "observacoes");

    format!(
        "UPDATE equipments SET {} WHERE public_id = ${} RETURNING *",
        sets.join(", "),
        idx
    )
}
