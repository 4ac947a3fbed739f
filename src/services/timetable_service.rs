use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    audit,
    dto::timetable::{CreateShiftRequest, TimetableQuery},
    entity::{
        employee_hours::ActiveModel as HoursActive,
        employees::Entity as Employees,
        locations::Entity as Locations,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Role, TimetableEntry},
    response::{ApiResponse, ListData, Meta},
    services::auth_service::confirm_access,
    state::AppState,
    validation::validate_new_shift,
};

/// Worked shifts, newest first, with employee and location names resolved.
pub async fn list_timetable(
    state: &AppState,
    query: TimetableQuery,
) -> AppResult<ApiResponse<ListData<TimetableEntry>>> {
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err(AppError::BadRequest("`from` must not be after `to`".into()));
        }
    }

    let rows = sqlx::query_as::<_, TimetableEntry>(
        r#"
        SELECT h.id,
               h.employee_id,
               e.first_name || ' ' || e.last_name AS employee_name,
               h.work_date,
               h.hours_worked,
               h.location_id,
               l.name AS location_name,
               h.pay_rate
        FROM employee_hours h
        LEFT JOIN employees e ON e.id = h.employee_id
        LEFT JOIN locations l ON l.id = h.location_id
        WHERE ($1::int IS NULL OR h.employee_id = $1)
          AND ($2::date IS NULL OR h.work_date >= $2)
          AND ($3::date IS NULL OR h.work_date <= $3)
        ORDER BY h.work_date DESC, h.id DESC
        "#,
    )
    .bind(query.employee_id)
    .bind(query.from)
    .bind(query.to)
    .fetch_all(&state.pool)
    .await?;

    let meta = Meta::count(rows.len());
    Ok(ApiResponse::list("Timetable", rows, meta))
}

pub async fn create_shift(
    state: &AppState,
    user: &AuthUser,
    payload: CreateShiftRequest,
) -> AppResult<ApiResponse<TimetableEntry>> {
    ensure_admin(user)?;
    validate_new_shift(&payload)?;
    confirm_access(state, user, Role::Admin).await?;

    let employee = Employees::find_by_id(payload.employee_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Unknown employee {}", payload.employee_id)))?;

    let location = match payload.location_id {
        Some(id) => Some(
            Locations::find_by_id(id)
                .one(&state.orm)
                .await?
                .ok_or_else(|| AppError::BadRequest(format!("Unknown location {id}")))?,
        ),
        None => None,
    };

    let shift = HoursActive {
        id: NotSet,
        employee_id: Set(employee.id),
        work_date: Set(payload.work_date),
        hours_worked: Set(payload.hours_worked),
        location_id: Set(payload.location_id),
        pay_rate: Set(payload.pay_rate.unwrap_or(employee.hourly_wage)),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.employee_id,
        "shift_create",
        "employee_hours",
        serde_json::json!({ "shift_id": shift.id, "employee_id": employee.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Shift recorded",
        TimetableEntry {
            id: shift.id,
            employee_id: shift.employee_id,
            employee_name: Some(format!("{} {}", employee.first_name, employee.last_name)),
            work_date: shift.work_date,
            hours_worked: shift.hours_worked,
            location_id: shift.location_id,
            location_name: location.map(|l| l.name),
            pay_rate: shift.pay_rate,
        },
        Some(Meta::empty()),
    ))
}
