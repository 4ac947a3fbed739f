use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::{
    audit,
    dto::customers::{CreateCustomerRequest, CustomerSearchQuery},
    entity::customers::{ActiveModel, Column, Entity as Customers},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::{Customer, Role},
    response::{ApiResponse, ListData, Meta},
    services::auth_service::confirm_access,
    state::AppState,
    validation::{clean_optional, contains_pattern, validate_new_customer},
};

const SEARCH_LIMIT: u64 = 5;

pub async fn create_customer(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    ensure_role(user, Role::Sales)?;
    validate_new_customer(&payload)?;
    confirm_access(state, user, Role::Sales).await?;

    let customer = ActiveModel {
        id: NotSet,
        first_name: Set(payload.first_name.trim().to_string()),
        last_name: Set(payload.last_name.trim().to_string()),
        email: Set(clean_optional(payload.email)),
        phone: Set(clean_optional(payload.phone)),
        preferred_contact_method: Set(clean_optional(payload.preferred_contact_method)),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.employee_id,
        "customer_create",
        "customers",
        serde_json::json!({ "customer_id": customer.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Customer created",
        Customer::from(customer),
        Some(Meta::empty()),
    ))
}

/// Name lookup for the sale form; a blank query matches nobody.
pub async fn search_customers(
    state: &AppState,
    user: &AuthUser,
    query: CustomerSearchQuery,
) -> AppResult<ApiResponse<ListData<Customer>>> {
    ensure_role(user, Role::Sales)?;
    let Some(term) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
        return Ok(ApiResponse::list("Customers", Vec::new(), Meta::count(0)));
    };

    let pattern = contains_pattern(term);
    let items: Vec<Customer> = Customers::find()
        .filter(
            Condition::any()
                .add(Expr::col(Column::FirstName).ilike(pattern.clone()))
                .add(Expr::col(Column::LastName).ilike(pattern)),
        )
        .order_by_asc(Column::LastName)
        .order_by_asc(Column::FirstName)
        .limit(SEARCH_LIMIT)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Customer::from)
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::list("Customers", items, meta))
}

pub async fn get_customer(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Customer>> {
    ensure_role(user, Role::Sales)?;
    let customer = Customers::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Customer::from)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Customer", customer, None))
}
