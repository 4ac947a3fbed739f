use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    error::AppResult,
    labels::ProductLabel,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::label_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/{product_id}", get(product_label))
}

#[utoipa::path(
    get,
    path = "/api/labels/{product_id}",
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Printable label for the product", body = ApiResponse<ProductLabel>),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Product not found")
    ),
    tag = "Labels"
)]
pub async fn product_label(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<i32>,
) -> AppResult<Json<ApiResponse<ProductLabel>>> {
    let resp = label_service::product_label(&state, &user, product_id).await?;
    Ok(Json(resp))
}
