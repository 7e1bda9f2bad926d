//! Data models for Coldsystem

pub mod equipment;

// Re-export commonly used types
pub use equipment::{
    CreateEquipment, Equipment, EquipmentQuery, EquipmentShort, EquipmentStatus, OrderBy,
    UpdateEquipment,
};
