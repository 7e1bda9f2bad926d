//! Repository layer for database operations

pub mod equipment;

use sqlx::{Pool, Postgres};

/// Main repository struct holding the per-table repositories
#[derive(Clone)]
pub struct Repository {
    pub equipment: equipment::EquipmentRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool),
        }
    }
}
