use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::ingredients::{CreateIngredientRequest, UpdateIngredientRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Ingredient,
    response::{ApiResponse, ListData},
    routes::params::Pagination,
    services::ingredient_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ingredients).post(create_ingredient))
        .route("/low-stock", get(list_low_stock))
        .route(
            "/{id}",
            get(get_ingredient)
                .put(update_ingredient)
                .delete(delete_ingredient),
        )
}

#[utoipa::path(
    get,
    path = "/api/ingredients",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 10"),
    ),
    responses(
        (status = 200, description = "List ingredients", body = ApiResponse<ListData<Ingredient>>),
        (status = 403, description = "Kitchen role required")
    ),
    tag = "Ingredients"
)]
pub async fn list_ingredients(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ListData<Ingredient>>>> {
    let resp = ingredient_service::list_ingredients(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/ingredients/low-stock",
    responses(
        (status = 200, description = "Ingredients at or below their reorder threshold", body = ApiResponse<ListData<Ingredient>>)
    ),
    tag = "Ingredients"
)]
pub async fn list_low_stock(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ListData<Ingredient>>>> {
    let resp = ingredient_service::list_low_stock(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/ingredients/{id}",
    params(
        ("id" = i32, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 200, description = "Get ingredient", body = ApiResponse<Ingredient>),
        (status = 404, description = "Ingredient not found")
    ),
    tag = "Ingredients"
)]
pub async fn get_ingredient(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Ingredient>>> {
    let resp = ingredient_service::get_ingredient(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/ingredients",
    request_body = CreateIngredientRequest,
    responses(
        (status = 201, description = "Create ingredient", body = ApiResponse<Ingredient>),
        (status = 422, description = "Invalid fields")
    ),
    tag = "Ingredients"
)]
pub async fn create_ingredient(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateIngredientRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Ingredient>>)> {
    let resp = ingredient_service::create_ingredient(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/ingredients/{id}",
    params(
        ("id" = i32, Path, description = "Ingredient ID")
    ),
    request_body = UpdateIngredientRequest,
    responses(
        (status = 200, description = "Updated ingredient", body = ApiResponse<Ingredient>),
        (status = 404, description = "Ingredient not found")
    ),
    tag = "Ingredients"
)]
pub async fn update_ingredient(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateIngredientRequest>,
) -> AppResult<Json<ApiResponse<Ingredient>>> {
    let resp = ingredient_service::update_ingredient(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/ingredients/{id}",
    params(
        ("id" = i32, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 200, description = "Deleted ingredient"),
        (status = 404, description = "Ingredient not found")
    ),
    tag = "Ingredients"
)]
pub async fn delete_ingredient(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = ingredient_service::delete_ingredient(&state, &user, id).await?;
    Ok(Json(resp))
}
