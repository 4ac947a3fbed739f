use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::customers::{CreateCustomerRequest, CustomerSearchQuery},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Customer,
    response::{ApiResponse, ListData},
    services::customer_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_customer))
        .route("/search", get(search_customers))
        .route("/{id}", get(get_customer))
}

#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = ApiResponse<Customer>),
        (status = 422, description = "Invalid fields")
    ),
    tag = "Customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCustomerRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Customer>>)> {
    let resp = customer_service::create_customer(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/customers/search",
    params(
        ("q" = Option<String>, Query, description = "Part of a first or last name"),
    ),
    responses(
        (status = 200, description = "Up to five matching customers", body = ApiResponse<ListData<Customer>>)
    ),
    tag = "Customers"
)]
pub async fn search_customers(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<CustomerSearchQuery>,
) -> AppResult<Json<ApiResponse<ListData<Customer>>>> {
    let resp = customer_service::search_customers(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Get customer", body = ApiResponse<Customer>),
        (status = 404, description = "Customer not found")
    ),
    tag = "Customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::get_customer(&state, &user, id).await?;
    Ok(Json(resp))
}
