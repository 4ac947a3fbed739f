use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::Location,
    response::{ApiResponse, ListData},
    services::location_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_locations))
}

#[utoipa::path(
    get,
    path = "/api/locations",
    responses(
        (status = 200, description = "Store locations by name", body = ApiResponse<ListData<Location>>)
    ),
    tag = "Locations"
)]
pub async fn list_locations(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<ListData<Location>>>> {
    let resp = location_service::list_locations(&state).await?;
    Ok(Json(resp))
}
