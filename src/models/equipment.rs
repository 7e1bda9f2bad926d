//! Equipment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Fixed number of equipments returned per list page
pub const PAGE_SIZE: i64 = 10;

/// Highest accepted page number, keeps the offset well inside `i64`
pub const MAX_PAGE: i64 = 1_000_000;

/// Operational state of an equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentStatus {
    Operacional,
    Manutencao,
    Critico,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Operacional => "operacional",
            EquipmentStatus::Manutencao => "manutencao",
            EquipmentStatus::Critico => "critico",
        }
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operacional" => Ok(EquipmentStatus::Operacional),
            "manutencao" => Ok(EquipmentStatus::Manutencao),
            "critico" => Ok(EquipmentStatus::Critico),
            _ => Err(format!("Invalid equipment status: {}", s)),
        }
    }
}

// Stored as TEXT, guarded by a CHECK constraint
impl sqlx::Type<Postgres> for EquipmentStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for EquipmentStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: &str = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for EquipmentStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Rejects strings that are empty or only whitespace
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: Uuid,
    /// External identifier used in URLs and QR codes
    pub public_id: String,
    /// Display name
    pub name: String,
    pub modelo: String,
    /// Serial number, unique across equipments
    pub num_serie: String,
    /// Manufacturer brand
    pub marca: String,
    /// Store
    pub loja: String,
    /// Sector within the store
    pub setor: String,
    /// Address
    pub endereco: String,
    pub compressor: String,
    pub controlador: String,
    /// Refrigerant type (e.g. R-134a)
    pub refrigerante: String,
    pub status: EquipmentStatus,
    /// Free-text notes
    pub observacoes: Option<String>,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Equipment row as shown in lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentShort {
    pub id: Uuid,
    pub public_id: String,
    pub name: String,
    pub status: EquipmentStatus,
}

/// Create equipment request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipment {
    /// Generated by the server when omitted
    #[validate(
        length(min = 1, max = 50, message = "publicId must be 1-50 characters"),
        custom(function = "not_blank")
    )]
    pub public_id: Option<String>,
    #[validate(
        length(min = 5, message = "name must be at least 5 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub modelo: String,
    #[validate(custom(function = "not_blank"))]
    pub num_serie: String,
    #[validate(custom(function = "not_blank"))]
    pub marca: String,
    #[validate(custom(function = "not_blank"))]
    pub loja: String,
    #[validate(custom(function = "not_blank"))]
    pub setor: String,
    #[validate(custom(function = "not_blank"))]
    pub endereco: String,
    #[validate(custom(function = "not_blank"))]
    pub compressor: String,
    #[validate(custom(function = "not_blank"))]
    pub controlador: String,
    #[validate(custom(function = "not_blank"))]
    pub refrigerante: String,
    pub status: EquipmentStatus,
    pub observacoes: Option<String>,
}

/// Update equipment request (partial patch)
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipment {
    #[validate(
        length(min = 5, message = "name must be at least 5 characters"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub modelo: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub num_serie: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub marca: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub loja: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub setor: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub endereco: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub compressor: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub controlador: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub refrigerante: Option<String>,
    pub status: Option<EquipmentStatus>,
    /// Absent leaves notes unchanged, `null` clears them
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub observacoes: Option<Option<String>>,
}

impl UpdateEquipment {
    /// True when the patch carries no field at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.modelo.is_none()
            && self.num_serie.is_none()
            && self.marca.is_none()
            && self.loja.is_none()
            && self.setor.is_none()
            && self.endereco.is_none()
            && self.compressor.is_none()
            && self.controlador.is_none()
            && self.refrigerante.is_none()
            && self.status.is_none()
            && self.observacoes.is_none()
    }
}

/// Sort column for equipment lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Id,
    Name,
}

impl OrderBy {
    /// ORDER BY clause body; `id` breaks ties so pages are stable
    pub fn order_clause(&self) -> &'static str {
        match self {
            OrderBy::Id => "id ASC",
            OrderBy::Name => "name ASC, id ASC",
        }
    }
}

/// Query parameters for listing equipments
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EquipmentQuery {
    /// Case-insensitive substring of the name
    #[validate(length(max = 100, message = "search must be at most 100 characters"))]
    pub search: Option<String>,
    /// Sort column (default: id)
    pub order_by: Option<OrderBy>,
    /// Page number, 1-based (default: 1)
    #[validate(range(min = 1, max = 1_000_000, message = "page must be between 1 and 1000000"))]
    pub page: Option<i64>,
}

impl EquipmentQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * PAGE_SIZE
    }

    pub fn order_by(&self) -> OrderBy {
        self.order_by.unwrap_or_default()
    }

    /// Trimmed search term, `None` when empty
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
