use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::SqlErr;
use serde::Serialize;
use thiserror::Error;

use crate::{
    response::{ApiResponse, Meta},
    validation::FieldErrors,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Unauthorized {0}")]
    Unauthorized(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Conflict {0}")]
    Conflict(String),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DbError(err) => match err.as_database_error() {
                Some(db) if db.is_unique_violation() || db.is_foreign_key_violation() => {
                    StatusCode::CONFLICT
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::OrmError(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_))
                | Some(SqlErr::ForeignKeyConstraintViolation(_)) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<String, String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match (&self, status) {
            (AppError::DbError(_) | AppError::OrmError(_), StatusCode::CONFLICT) => {
                "Conflict with existing data".to_string()
            }
            _ => self.to_string(),
        };

        if status.is_server_error() {
            match &self {
                AppError::DbError(err) => tracing::error!(error = %err, "database error"),
                AppError::OrmError(err) => tracing::error!(error = %err, "orm error"),
                AppError::Internal(err) => tracing::error!(error = ?err, "internal error"),
                _ => {}
            }
        }

        let fields = match self {
            AppError::Validation(errors) => Some(errors.into_map()),
            _ => None,
        };

        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData {
                error: message,
                fields,
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
