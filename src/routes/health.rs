use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    labels::BRAND,
    response::{ApiResponse, Meta},
};

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    status: String,
}

#[derive(Serialize, ToSchema)]
pub struct AboutData {
    pub name: String,
    pub version: String,
    pub description: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
    security(()),
    tag = "Health"
)]
pub async fn health_check() -> Json<ApiResponse<HealthData>> {
    let data = HealthData {
        status: "ok".to_string(),
    };

    Json(ApiResponse::success(
        "Health check",
        data,
        Some(Meta::empty()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/about",
    responses(
        (status = 200, description = "Application info", body = ApiResponse<AboutData>),
    ),
    security(()),
    tag = "Health"
)]
pub async fn about() -> Json<ApiResponse<AboutData>> {
    let data = AboutData {
        name: format!("{BRAND} Back Office"),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Products, ingredients, sales, staff and reporting for the family \
                      bakery's shops and market stalls."
            .to_string(),
    };

    Json(ApiResponse::success("About", data, None))
}
