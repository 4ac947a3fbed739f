use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};

use crate::{dto::auth::Claims, error::AppError, models::Role, state::AppState};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub employee_id: i32,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Admins pass every gate; anyone else needs the exact role.
pub fn ensure_role(user: &AuthUser, role: Role) -> Result<(), AppError> {
    if user.role != role && !user.is_admin() {
        tracing::debug!(
            employee_id = user.employee_id,
            role = user.role.as_str(),
            required = role.as_str(),
            "role gate rejected request"
        );
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, Role::Admin)
}

pub fn decode_token(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

    let employee_id = decoded
        .claims
        .sub
        .parse::<i32>()
        .map_err(|_| AppError::Unauthorized("Invalid employee id in token".into()))?;

    let role = Role::parse(&decoded.claims.role)
        .ok_or_else(|| AppError::Unauthorized("Invalid role in token".into()))?;

    Ok(AuthUser { employee_id, role })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?
            .trim();

        decode_token(token, &state.auth.jwt_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            employee_id: 7,
            role,
        }
    }

    #[test]
    fn matching_role_passes() {
        assert!(ensure_role(&user(Role::Kitchen), Role::Kitchen).is_ok());
        assert!(ensure_role(&user(Role::Sales), Role::Sales).is_ok());
    }

    #[test]
    fn admin_passes_every_gate() {
        for role in Role::ALL {
            assert!(ensure_role(&user(Role::Admin), role).is_ok());
        }
    }

    #[test]
    fn other_roles_are_forbidden() {
        assert!(matches!(
            ensure_role(&user(Role::Sales), Role::Kitchen),
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            ensure_admin(&user(Role::Kitchen)),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn garbage_token_is_unauthorized() {
        assert!(matches!(
            decode_token("not.a.jwt", "secret"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
