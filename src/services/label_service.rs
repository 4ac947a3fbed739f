use chrono::{Datelike, Utc};

use crate::{
    error::AppResult,
    labels::ProductLabel,
    middleware::auth::{AuthUser, ensure_admin},
    response::ApiResponse,
    services::product_service::find_product,
    state::AppState,
};

pub async fn product_label(
    state: &AppState,
    user: &AuthUser,
    product_id: i32,
) -> AppResult<ApiResponse<ProductLabel>> {
    ensure_admin(user)?;
    let product = find_product(state, product_id).await?;
    let label = ProductLabel::for_product(&product, Utc::now().year());
    tracing::debug!(product_id, "label generated");
    Ok(ApiResponse::success("Label", label, None))
}
