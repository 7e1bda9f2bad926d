//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{equipment, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coldsystem API",
        version = "0.1.0",
        description = "Refrigeration equipment tracking REST API",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1"),
        (url = "/", description = "Unversioned")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipments
        equipment::create_equipment,
        equipment::list_equipments,
        equipment::get_equipment,
        equipment::update_equipment,
    ),
    components(
        schemas(
            // Equipments
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentShort,
            crate::models::equipment::EquipmentStatus,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::OrderBy,
            equipment::CreatedResponse,
            equipment::EquipmentResponse,
            equipment::EquipmentListResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipments", description = "Refrigeration equipment registry")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
