use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{EntityTrait, QueryFilter};

use crate::{
    audit,
    dto::auth::{Claims, LoginRequest, LoginResponse},
    entity::employees::{self, Entity as Employees},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::{Employee, Role},
    response::{ApiResponse, Meta},
    state::{AppState, AuthSettings},
};

const TERMINATED: &str = "Terminated";

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Signs a token for `employee_id`; returns the token and its expiry as a unix timestamp.
pub fn issue_token(settings: &AuthSettings, employee_id: i32, role: Role) -> AppResult<(String, i64)> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(settings.token_ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: employee_id.to_string(),
        role: role.as_str().to_string(),
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    Ok((token, expiration.timestamp()))
}

/// Username/password check behind the login screen.
pub async fn login_employee(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { username, password } = payload;
    let username = username.trim().to_lowercase();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Please enter both username and password".into(),
        ));
    }

    let employee = Employees::find()
        .filter(Expr::expr(Func::lower(Expr::col(employees::Column::Username))).eq(username.as_str()))
        .one(&state.orm)
        .await?;

    let employee = match employee {
        Some(e) => e,
        None => {
            tracing::info!(username = %username, "login rejected: unknown username");
            return Err(AppError::Unauthorized("Invalid username or password".into()));
        }
    };

    if !verify_password(&password, &employee.password_hash)? {
        tracing::info!(employee_id = employee.id, "login rejected: bad password");
        return Err(AppError::Unauthorized("Invalid username or password".into()));
    }

    if employee.status == TERMINATED {
        tracing::info!(employee_id = employee.id, "login rejected: terminated");
        return Err(AppError::Forbidden);
    }

    let employee = Employee::try_from(employee)?;
    let (token, expires_at) = issue_token(&state.auth, employee.id, employee.role)?;

    audit::record(
        &state.pool,
        employee.id,
        "employee_login",
        "employees",
        serde_json::json!({ "employee_id": employee.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {}", token),
            expires_at,
            employee,
        },
        Some(Meta::empty()),
    ))
}

pub async fn current_employee(state: &AppState, user: &AuthUser) -> AppResult<Employee> {
    let employee = Employees::find_by_id(user.employee_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Employee no longer exists".into()))?;
    Employee::try_from(employee)
}

/// Re-reads the token holder before a write. A terminated employee or one whose role
/// changed is refused even while their token is still unexpired.
pub async fn confirm_access(state: &AppState, user: &AuthUser, role: Role) -> AppResult<()> {
    let employee = current_employee(state, user).await?;
    if employee.status == TERMINATED {
        tracing::warn!(employee_id = employee.id, "terminated employee used a live token");
        return Err(AppError::Forbidden);
    }
    ensure_role(
        &AuthUser {
            employee_id: employee.id,
            role: employee.role,
        },
        role,
    )
}

pub async fn me(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Employee>> {
    let employee = current_employee(state, user).await?;
    Ok(ApiResponse::success("Current employee", employee, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::decode_token;

    #[test]
    fn password_hash_verifies_only_matching_password() {
        let hash = hash_password("butter-tarts").unwrap();
        assert!(verify_password("butter-tarts", &hash).unwrap());
        assert!(!verify_password("butter-tart", &hash).unwrap());
    }

    #[test]
    fn issued_token_carries_employee_and_role() {
        let settings = AuthSettings {
            jwt_secret: "test-secret".into(),
            token_ttl_hours: 1,
        };
        let (token, expires_at) = issue_token(&settings, 42, Role::Kitchen).unwrap();
        assert!(expires_at > Utc::now().timestamp());

        let user = decode_token(&token, "test-secret").unwrap();
        assert_eq!(user.employee_id, 42);
        assert_eq!(user.role, Role::Kitchen);

        assert!(decode_token(&token, "other-secret").is_err());
    }
}
