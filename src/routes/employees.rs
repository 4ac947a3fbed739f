use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
};

use crate::{
    dto::employees::{CreateEmployeeRequest, UpdateEmployeeRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Employee,
    response::{ApiResponse, ListData},
    services::employee_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/{id}", patch(update_employee))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = ApiResponse<ListData<Employee>>),
        (status = 403, description = "Admin role required")
    ),
    tag = "Employees"
)]
pub async fn list_employees(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ListData<Employee>>>> {
    let resp = employee_service::list_employees(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = ApiResponse<Employee>),
        (status = 409, description = "Username already taken"),
        (status = 422, description = "Invalid fields")
    ),
    tag = "Employees"
)]
pub async fn create_employee(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateEmployeeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Employee>>)> {
    let resp = employee_service::create_employee(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/employees/{id}",
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = ApiResponse<Employee>),
        (status = 404, description = "Employee not found"),
        (status = 422, description = "Invalid fields")
    ),
    tag = "Employees"
)]
pub async fn update_employee(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let resp = employee_service::update_employee(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
