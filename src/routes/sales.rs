use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::sales::{CreateSaleRequest, SaleListQuery, SaleWithItems},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Sale,
    response::{ApiResponse, ListData},
    services::sale_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/{id}", get(get_sale))
}

#[utoipa::path(
    get,
    path = "/api/sales",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("location_id" = Option<i32>, Query, description = "Only sales at this location"),
        ("from" = Option<String>, Query, description = "First sale day, YYYY-MM-DD"),
        ("to" = Option<String>, Query, description = "Last sale day, YYYY-MM-DD"),
    ),
    responses(
        (status = 200, description = "Recorded sales, newest first", body = ApiResponse<ListData<Sale>>)
    ),
    tag = "Sales"
)]
pub async fn list_sales(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SaleListQuery>,
) -> AppResult<Json<ApiResponse<ListData<Sale>>>> {
    let resp = sale_service::list_sales(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/sales",
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Sale recorded", body = ApiResponse<SaleWithItems>),
        (status = 400, description = "Unknown product/location or insufficient stock"),
        (status = 422, description = "Invalid fields")
    ),
    tag = "Sales"
)]
pub async fn create_sale(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateSaleRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<SaleWithItems>>)> {
    let resp = sale_service::create_sale(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    params(
        ("id" = i32, Path, description = "Sale ID")
    ),
    responses(
        (status = 200, description = "Sale with its line items", body = ApiResponse<SaleWithItems>),
        (status = 404, description = "Sale not found")
    ),
    tag = "Sales"
)]
pub async fn get_sale(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<SaleWithItems>>> {
    let resp = sale_service::get_sale(&state, &user, id).await?;
    Ok(Json(resp))
}
