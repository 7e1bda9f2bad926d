//! Equipment API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::equipment::{CreateEquipment, Equipment, EquipmentQuery, EquipmentShort, UpdateEquipment},
};

use super::{ValidatedJson, ValidatedQuery};

/// Identifier of a newly created equipment
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: Uuid,
}

/// Single equipment wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct EquipmentResponse {
    pub equipment: Equipment,
}

/// One page of equipments
#[derive(Debug, Serialize, ToSchema)]
pub struct EquipmentListResponse {
    pub equipments: Vec<EquipmentShort>,
    /// Number of matching equipments, ignoring pagination
    pub total: i64,
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipments",
    tag = "equipments",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = CreatedResponse),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse),
        (status = 409, description = "Duplicate publicId or numSerie", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    ValidatedJson(data): ValidatedJson<CreateEquipment>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let equipment = state.services.equipment.create(data).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: equipment.id })))
}

/// List equipments with search, ordering and pagination
#[utoipa::path(
    get,
    path = "/equipments",
    tag = "equipments",
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Equipment page", body = EquipmentListResponse),
        (status = 400, description = "Invalid query", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_equipments(
    State(state): State<crate::AppState>,
    ValidatedQuery(query): ValidatedQuery<EquipmentQuery>,
) -> AppResult<Json<EquipmentListResponse>> {
    let (equipments, total) = state.services.equipment.list(&query).await?;
    Ok(Json(EquipmentListResponse { equipments, total }))
}

/// Get equipment by public id
#[utoipa::path(
    get,
    path = "/equipments/{id}",
    tag = "equipments",
    params(("id" = String, Path, description = "Equipment public id")),
    responses(
        (status = 200, description = "Equipment details", body = EquipmentResponse),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<EquipmentResponse>> {
    let equipment = state.services.equipment.get_by_public_id(&id).await?;
    Ok(Json(EquipmentResponse { equipment }))
}

/// Partially update equipment by public id
#[utoipa::path(
    put,
    path = "/equipments/{id}",
    tag = "equipments",
    params(("id" = String, Path, description = "Equipment public id")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = EquipmentResponse),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Duplicate numSerie", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    ValidatedJson(data): ValidatedJson<UpdateEquipment>,
) -> AppResult<Json<EquipmentResponse>> {
    let equipment = state.services.equipment.update(&id, &data).await?;
    Ok(Json(EquipmentResponse { equipment }))
}
