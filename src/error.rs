use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::response::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("ORM error")]
    OrmError(#[from] DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{what} not found"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::OrmError(err) => classify_db_error(err).0,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Fallback mapping for driver errors that slipped past the structured checks.
fn classify_db_error(err: &DbErr) -> (StatusCode, &'static str) {
    if let DbErr::RecordNotFound(_) = err {
        return (StatusCode::NOT_FOUND, "Record not found");
    }
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            (StatusCode::CONFLICT, "Record violates a uniqueness rule")
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            (StatusCode::BAD_REQUEST, "Referenced record does not exist")
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, detail) = match &self {
            AppError::OrmError(err) => {
                let (_, message) = classify_db_error(err);
                if status.is_server_error() {
                    tracing::error!(error = %err, "database error");
                }
                (message.to_string(), message.to_string())
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                (self.to_string(), self.to_string())
            }
            other => (
                status.canonical_reason().unwrap_or("Error").to_string(),
                other.to_string(),
            ),
        };

        let body = ApiResponse::failure(status.as_u16(), message, detail);
        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
