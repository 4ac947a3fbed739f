use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::{
    audit,
    dto::products::{CreateProductRequest, UpdateProductRequest},
    entity::{
        products::{ActiveModel, Column, Entity as Products},
        sale_items::{Column as SaleItemCol, Entity as SaleItems},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Product, Role},
    response::{ApiResponse, ListData, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    services::auth_service::confirm_access,
    state::AppState,
    validation::{clean_optional, contains_pattern, validate_new_product, validate_product_update},
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ListData<Product>>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = contains_pattern(search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Category).ilike(pattern)),
        );
    }

    if let Some(category) = query.category.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        condition = condition
            .add(Expr::expr(Func::lower(Expr::col(Column::Category))).eq(category.to_lowercase()));
    }

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::Name);
    let sort_order = query.sort_order.unwrap_or(SortOrder::Asc);
    let sort_col = match sort_by {
        ProductSortBy::Name => Column::Name,
        ProductSortBy::Price => Column::Price,
        ProductSortBy::StockQuantity => Column::StockQuantity,
        ProductSortBy::CreatedAt => Column::CreatedAt,
    };

    let mut finder = Products::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };
    finder = finder.order_by_asc(Column::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    Ok(ApiResponse::list("Products", items, Meta::new(page, limit, total)))
}

pub async fn find_product(state: &AppState, id: i32) -> AppResult<Product> {
    Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Product::from)
        .ok_or(AppError::NotFound)
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = find_product(state, id).await?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    validate_new_product(&payload)?;
    confirm_access(state, user, Role::Admin).await?;

    let name = payload.name.trim().to_string();
    ensure_name_free(state, &name, None).await?;

    let active = ActiveModel {
        id: NotSet,
        name: Set(name),
        category: Set(payload.category.trim().to_string()),
        size: Set(clean_optional(payload.size)),
        price: Set(payload.price),
        stock_quantity: Set(payload.stock_quantity),
        description: Set(clean_optional(payload.description)),
        allergen_info: Set(clean_optional(payload.allergen_info)),
        dietary_info: Set(clean_optional(payload.dietary_info)),
        created_at: NotSet,
    };
    let product = active.insert(&state.orm).await?;
    tracing::info!(product_id = product.id, name = %product.name, "product created");

    audit::record(
        &state.pool,
        user.employee_id,
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    validate_product_update(&payload)?;
    confirm_access(state, user, Role::Admin).await?;

    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        ensure_name_free(state, &name, Some(id)).await?;
        active.name = Set(name);
    }
    if let Some(category) = payload.category {
        active.category = Set(category.trim().to_string());
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(stock) = payload.stock_quantity {
        active.stock_quantity = Set(stock);
    }
    if payload.size.is_some() {
        active.size = Set(clean_optional(payload.size));
    }
    if payload.description.is_some() {
        active.description = Set(clean_optional(payload.description));
    }
    if payload.allergen_info.is_some() {
        active.allergen_info = Set(clean_optional(payload.allergen_info));
    }
    if payload.dietary_info.is_some() {
        active.dietary_info = Set(clean_optional(payload.dietary_info));
    }

    let product = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.employee_id,
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    confirm_access(state, user, Role::Admin).await?;

    let sold = SaleItems::find()
        .filter(SaleItemCol::ProductId.eq(id))
        .count(&state.orm)
        .await?;
    if sold > 0 {
        return Err(AppError::Conflict(
            "Product has recorded sales and cannot be deleted".into(),
        ));
    }

    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.employee_id,
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn ensure_name_free(state: &AppState, name: &str, except: Option<i32>) -> AppResult<()> {
    let mut finder = Products::find()
        .filter(Expr::expr(Func::lower(Expr::col(Column::Name))).eq(name.to_lowercase()));
    if let Some(id) = except {
        finder = finder.filter(Column::Id.ne(id));
    }
    if finder.count(&state.orm).await? > 0 {
        return Err(AppError::Conflict(format!("A product named '{name}' already exists")));
    }
    Ok(())
}
