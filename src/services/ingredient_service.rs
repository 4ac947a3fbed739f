use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::{
    audit,
    dto::ingredients::{CreateIngredientRequest, UpdateIngredientRequest},
    entity::ingredients::{ActiveModel, Column, Entity as Ingredients},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::{Ingredient, Role},
    response::{ApiResponse, ListData, Meta},
    routes::params::Pagination,
    services::auth_service::confirm_access,
    state::AppState,
    validation::{validate_ingredient_update, validate_new_ingredient},
};

const DEFAULT_PAGE_SIZE: i64 = 10;

pub async fn list_ingredients(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<ListData<Ingredient>>> {
    ensure_role(user, Role::Kitchen)?;
    let (page, limit, offset) = pagination.normalize_with(DEFAULT_PAGE_SIZE);

    let finder = Ingredients::find().order_by_asc(Column::Id);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Ingredient::from)
        .collect();

    Ok(ApiResponse::list("Ingredients", items, Meta::new(page, limit, total)))
}

/// Ingredients at or below their reorder threshold, lowest stock first.
pub async fn list_low_stock(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<ListData<Ingredient>>> {
    ensure_role(user, Role::Kitchen)?;
    let items: Vec<Ingredient> = low_stock_query()
        .order_by_asc(Column::CurrentStock)
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Ingredient::from)
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::list("Low stock", items, meta))
}

pub async fn count_low_stock(state: &AppState) -> AppResult<i64> {
    Ok(low_stock_query().count(&state.orm).await? as i64)
}

fn low_stock_query() -> sea_orm::Select<Ingredients> {
    Ingredients::find()
        .filter(Expr::col(Column::CurrentStock).lte(Expr::col(Column::ReorderThreshold)))
        .filter(Expr::col(Column::ReorderThreshold).gt(0))
}

pub async fn get_ingredient(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Ingredient>> {
    ensure_role(user, Role::Kitchen)?;
    let ingredient = Ingredients::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Ingredient", Ingredient::from(ingredient), None))
}

pub async fn create_ingredient(
    state: &AppState,
    user: &AuthUser,
    payload: CreateIngredientRequest,
) -> AppResult<ApiResponse<Ingredient>> {
    ensure_role(user, Role::Kitchen)?;
    validate_new_ingredient(&payload)?;
    confirm_access(state, user, Role::Kitchen).await?;

    let ingredient = ActiveModel {
        id: NotSet,
        name: Set(payload.name.trim().to_string()),
        unit_of_measure: Set(payload.unit_of_measure.trim().to_string()),
        current_stock: Set(payload.current_stock),
        reorder_threshold: Set(payload.reorder_threshold),
        cost_per_unit: Set(payload.cost_per_unit),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    tracing::info!(ingredient_id = ingredient.id, name = %ingredient.name, "ingredient created");

    audit::record(
        &state.pool,
        user.employee_id,
        "ingredient_create",
        "ingredients",
        serde_json::json!({ "ingredient_id": ingredient.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Ingredient created",
        Ingredient::from(ingredient),
        Some(Meta::empty()),
    ))
}

pub async fn update_ingredient(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateIngredientRequest,
) -> AppResult<ApiResponse<Ingredient>> {
    ensure_role(user, Role::Kitchen)?;
    validate_ingredient_update(&payload)?;
    confirm_access(state, user, Role::Kitchen).await?;

    let existing = Ingredients::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(unit) = payload.unit_of_measure {
        active.unit_of_measure = Set(unit.trim().to_string());
    }
    if let Some(stock) = payload.current_stock {
        active.current_stock = Set(stock);
    }
    if let Some(threshold) = payload.reorder_threshold {
        active.reorder_threshold = Set(threshold);
    }
    if let Some(cost) = payload.cost_per_unit {
        active.cost_per_unit = Set(cost);
    }
    let ingredient = Ingredient::from(active.update(&state.orm).await?);
    if ingredient.stock_level.needs_reorder() {
        tracing::info!(
            ingredient_id = ingredient.id,
            level = ?ingredient.stock_level,
            "ingredient needs restocking"
        );
    }

    audit::record(
        &state.pool,
        user.employee_id,
        "ingredient_update",
        "ingredients",
        serde_json::json!({ "ingredient_id": ingredient.id }),
    )
    .await;

    Ok(ApiResponse::success("Updated", ingredient, Some(Meta::empty())))
}

pub async fn delete_ingredient(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_role(user, Role::Kitchen)?;
    confirm_access(state, user, Role::Kitchen).await?;
    let result = Ingredients::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.employee_id,
        "ingredient_delete",
        "ingredients",
        serde_json::json!({ "ingredient_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
