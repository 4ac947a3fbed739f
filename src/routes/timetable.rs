use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::timetable::{CreateShiftRequest, TimetableQuery},
    error::AppResult,
    middleware::auth::AuthUser,
    models::TimetableEntry,
    response::{ApiResponse, ListData},
    services::timetable_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_timetable).post(create_shift))
}

#[utoipa::path(
    get,
    path = "/api/timetable",
    params(
        ("employee_id" = Option<i32>, Query, description = "Only this employee's shifts"),
        ("from" = Option<String>, Query, description = "First work day, YYYY-MM-DD"),
        ("to" = Option<String>, Query, description = "Last work day, YYYY-MM-DD"),
    ),
    responses(
        (status = 200, description = "Worked shifts, newest first", body = ApiResponse<ListData<TimetableEntry>>)
    ),
    tag = "Timetable"
)]
pub async fn list_timetable(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<TimetableQuery>,
) -> AppResult<Json<ApiResponse<ListData<TimetableEntry>>>> {
    let resp = timetable_service::list_timetable(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/timetable",
    request_body = CreateShiftRequest,
    responses(
        (status = 201, description = "Shift recorded", body = ApiResponse<TimetableEntry>),
        (status = 400, description = "Unknown employee or location"),
        (status = 422, description = "Invalid fields")
    ),
    tag = "Timetable"
)]
pub async fn create_shift(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateShiftRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TimetableEntry>>)> {
    let resp = timetable_service::create_shift(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
