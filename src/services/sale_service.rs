use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use crate::{
    audit,
    dto::sales::{CreateSaleRequest, SaleListQuery, SaleWithItems},
    entity::{
        customers::Entity as Customers,
        locations::Entity as Locations,
        products::{Column as ProdCol, Entity as Products, Model as ProductModel},
        sale_items::{ActiveModel as SaleItemActive, Column as SaleItemCol, Entity as SaleItems},
        sales::{ActiveModel as SaleActive, Column as SaleCol, Entity as Sales},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::{Role, Sale, SaleItem},
    reports::{day_bounds, start_of_day},
    response::{ApiResponse, ListData, Meta},
    services::{auth_service::confirm_access, inventory_service::update_product_inventory},
    state::AppState,
    validation::{clean_optional, validate_new_sale},
};

/// Records a sale with its line items and takes the sold units out of stock.
///
/// Sale row, items and stock decrements share one transaction; any failure leaves the
/// database untouched.
pub async fn create_sale(
    state: &AppState,
    user: &AuthUser,
    payload: CreateSaleRequest,
) -> AppResult<ApiResponse<SaleWithItems>> {
    ensure_role(user, Role::Sales)?;
    let now = Utc::now();
    validate_new_sale(&payload, now.date_naive())?;
    confirm_access(state, user, Role::Sales).await?;

    let location_id = payload
        .location_id
        .ok_or_else(|| AppError::BadRequest("Please select a location".into()))?;
    let lines: Vec<(i32, i32)> = payload
        .items
        .iter()
        .filter_map(|item| Some((item.product_id?, item.quantity?)))
        .collect();
    let sale_date = sale_timestamp(payload.sale_date, now);

    let txn = state.orm.begin().await?;

    if Locations::find_by_id(location_id).one(&txn).await?.is_none() {
        return Err(AppError::BadRequest(format!("Unknown location {location_id}")));
    }
    if let Some(customer_id) = payload.customer_id {
        if Customers::find_by_id(customer_id).one(&txn).await?.is_none() {
            return Err(AppError::BadRequest(format!("Unknown customer {customer_id}")));
        }
    }

    let product_ids: Vec<i32> = lines.iter().map(|(product_id, _)| *product_id).collect();
    let products: HashMap<i32, ProductModel> = Products::find()
        .filter(ProdCol::Id.is_in(product_ids))
        .lock(LockType::Update)
        .all(&txn)
        .await?
        .into_iter()
        .map(|product| (product.id, product))
        .collect();

    let mut sale_total = Decimal::ZERO;
    let mut priced: Vec<(i32, i32, Decimal)> = Vec::with_capacity(lines.len());
    for (product_id, quantity) in &lines {
        let product = products
            .get(product_id)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown product {product_id}")))?;
        if product.stock_quantity < *quantity {
            return Err(AppError::BadRequest(format!(
                "Insufficient stock for {} ({} available)",
                product.name, product.stock_quantity
            )));
        }
        sale_total += product.price * Decimal::from(*quantity);
        priced.push((*product_id, *quantity, product.price));
    }

    let sale = SaleActive {
        id: NotSet,
        sale_date: Set(sale_date.into()),
        location_id: Set(location_id),
        payment_method: Set(clean_optional(payload.payment_method)),
        customer_id: Set(payload.customer_id),
        employee_id: Set(Some(user.employee_id)),
        sale_total: Set(sale_total),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut items: Vec<SaleItem> = Vec::with_capacity(priced.len());
    for (product_id, quantity, unit_price) in priced {
        let item = SaleItemActive {
            id: NotSet,
            sale_id: Set(sale.id),
            product_id: Set(product_id),
            quantity_sold: Set(quantity),
            unit_price: Set(unit_price),
        }
        .insert(&txn)
        .await?;
        items.push(SaleItem::from(item));

        update_product_inventory(&txn, product_id, quantity).await?;
    }

    txn.commit().await?;
    tracing::info!(
        sale_id = sale.id,
        location_id,
        items = items.len(),
        total = %sale.sale_total,
        "sale recorded"
    );

    audit::record(
        &state.pool,
        user.employee_id,
        "sale_create",
        "sales",
        serde_json::json!({ "sale_id": sale.id, "total": sale.sale_total.to_string() }),
    )
    .await;

    Ok(ApiResponse::success(
        "Sale recorded successfully",
        SaleWithItems {
            sale: Sale::from(sale),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_sales(
    state: &AppState,
    user: &AuthUser,
    query: SaleListQuery,
) -> AppResult<ApiResponse<ListData<Sale>>> {
    ensure_role(user, Role::Sales)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(location_id) = query.location_id {
        condition = condition.add(SaleCol::LocationId.eq(location_id));
    }
    if let Some(from) = query.from {
        condition = condition.add(SaleCol::SaleDate.gte(start_of_day(from)));
    }
    if let Some(to) = query.to {
        condition = condition.add(SaleCol::SaleDate.lt(day_bounds(to, to).1));
    }

    let finder = Sales::find()
        .filter(condition)
        .order_by_desc(SaleCol::SaleDate)
        .order_by_desc(SaleCol::Id);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Sale::from)
        .collect();

    Ok(ApiResponse::list("Sales", items, Meta::new(page, limit, total)))
}

pub async fn get_sale(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<SaleWithItems>> {
    ensure_role(user, Role::Sales)?;
    let sale = Sales::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let items = SaleItems::find()
        .filter(SaleItemCol::SaleId.eq(sale.id))
        .order_by_asc(SaleItemCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(SaleItem::from)
        .collect();

    Ok(ApiResponse::success(
        "Sale",
        SaleWithItems {
            sale: Sale::from(sale),
            items,
        },
        Some(Meta::empty()),
    ))
}

/// A picked calendar day keeps the current time of day; no day means "now".
pub fn sale_timestamp(day: Option<NaiveDate>, now: DateTime<Utc>) -> DateTime<Utc> {
    match day {
        Some(day) => day.and_time(now.time()).and_utc(),
        None => now,
    }
}
