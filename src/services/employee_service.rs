use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    audit,
    dto::employees::{CreateEmployeeRequest, UpdateEmployeeRequest},
    entity::employees::{ActiveModel, Column, Entity as Employees},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Employee, Role},
    response::{ApiResponse, ListData, Meta},
    services::auth_service::{confirm_access, hash_password},
    state::AppState,
    validation::{clean_optional, validate_employee_update, validate_new_employee},
};

pub async fn list_employees(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<ListData<Employee>>> {
    ensure_admin(user)?;
    let items = Employees::find()
        .order_by_asc(Column::LastName)
        .order_by_asc(Column::FirstName)
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Employee::try_from)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::count(items.len());
    Ok(ApiResponse::list("Employees", items, meta))
}

pub async fn create_employee(
    state: &AppState,
    user: &AuthUser,
    payload: CreateEmployeeRequest,
) -> AppResult<ApiResponse<Employee>> {
    ensure_admin(user)?;
    validate_new_employee(&payload)?;
    confirm_access(state, user, Role::Admin).await?;

    let username = payload.username.trim().to_string();
    let taken = Employees::find()
        .filter(Expr::expr(Func::lower(Expr::col(Column::Username))).eq(username.to_lowercase()))
        .one(&state.orm)
        .await?
        .is_some();
    if taken {
        return Err(AppError::Conflict(format!("Username `{username}` is already taken")));
    }

    let employee = ActiveModel {
        id: NotSet,
        first_name: Set(payload.first_name.trim().to_string()),
        last_name: Set(payload.last_name.trim().to_string()),
        username: Set(username),
        password_hash: Set(hash_password(&payload.password)?),
        role_id: Set(payload.role_id),
        employment_type: Set(payload.employment_type.unwrap_or_else(|| "Full-Time".into())),
        phone: Set(clean_optional(payload.phone)),
        hourly_wage: Set(payload.hourly_wage.unwrap_or(Decimal::ZERO)),
        status: Set("Active".into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(employee_id = employee.id, role_id = employee.role_id, "employee created");
    audit::record(
        &state.pool,
        user.employee_id,
        "employee_create",
        "employees",
        serde_json::json!({ "employee_id": employee.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Employee created",
        Employee::try_from(employee)?,
        Some(Meta::empty()),
    ))
}

pub async fn update_employee(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateEmployeeRequest,
) -> AppResult<ApiResponse<Employee>> {
    ensure_admin(user)?;
    validate_employee_update(&payload)?;
    confirm_access(state, user, Role::Admin).await?;

    let existing = Employees::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    if let Some(kind) = payload.employment_type {
        active.employment_type = Set(kind);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(clean_optional(Some(phone)));
    }
    if let Some(wage) = payload.hourly_wage {
        active.hourly_wage = Set(wage);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(role_id) = payload.role_id {
        active.role_id = Set(role_id);
    }

    let employee = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.employee_id,
        "employee_update",
        "employees",
        serde_json::json!({ "employee_id": employee.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Employee updated",
        Employee::try_from(employee)?,
        Some(Meta::empty()),
    ))
}
