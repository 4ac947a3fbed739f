use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::reports::{Dashboard, DailySales, DateRangeQuery, LocationSales, SalesSummary, SummaryQuery},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::report_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary))
        .route("/daily", get(daily))
        .route("/locations", get(by_location))
}

#[utoipa::path(
    get,
    path = "/api/reports/summary",
    params(
        ("as_of" = Option<String>, Query, description = "Last day of every window, YYYY-MM-DD; default today"),
    ),
    responses(
        (status = 200, description = "Daily, weekly, monthly and quarterly totals", body = ApiResponse<SalesSummary>)
    ),
    tag = "Reports"
)]
pub async fn summary(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<ApiResponse<SalesSummary>>> {
    let resp = report_service::summary(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/reports/daily",
    params(
        ("from" = Option<String>, Query, description = "First day, default 29 days before `to`"),
        ("to" = Option<String>, Query, description = "Last day, default today"),
    ),
    responses(
        (status = 200, description = "Totals per calendar day", body = ApiResponse<DailySales>),
        (status = 400, description = "`from` is after `to`")
    ),
    tag = "Reports"
)]
pub async fn daily(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<ApiResponse<DailySales>>> {
    let resp = report_service::daily(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/reports/locations",
    params(
        ("from" = Option<String>, Query, description = "First day, default 29 days before `to`"),
        ("to" = Option<String>, Query, description = "Last day, default today"),
    ),
    responses(
        (status = 200, description = "Totals per location and the top location", body = ApiResponse<LocationSales>),
        (status = 400, description = "`from` is after `to`")
    ),
    tag = "Reports"
)]
pub async fn by_location(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<ApiResponse<LocationSales>>> {
    let resp = report_service::by_location(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Landing page figures for the signed-in employee", body = ApiResponse<Dashboard>)
    ),
    tag = "Reports"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Dashboard>>> {
    let resp = report_service::dashboard(&state, &user).await?;
    Ok(Json(resp))
}
