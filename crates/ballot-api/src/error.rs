use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ballot_core::validation::FieldError;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication required")]
    AuthenticationRequired,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("{}: {}", .0.field, .0.message)]
    Validation(FieldError),
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Machine-readable error code string.
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            ApiError::Forbidden => "FORBIDDEN",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Validation(_) => "VALIDATION_FAILED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            // Unauthenticated and unauthorized both surface as 403; no
            // challenge scheme is offered.
            ApiError::AuthenticationRequired | ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        let message = match &self {
            ApiError::Internal(err) => {
                tracing::error!("API internal error: {err:#}");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        let details = match &self {
            ApiError::Validation(field_error) => {
                json!({ field_error.field: [field_error.message] })
            }
            _ => Value::Null,
        };

        let body = json!({
            "code": code,
            "message": message,
            "details": details,
        });

        (status, Json(body)).into_response()
    }
}

impl From<ballot_core::CoreError> for ApiError {
    fn from(e: ballot_core::CoreError) -> Self {
        match e {
            ballot_core::CoreError::AuthenticationRequired => ApiError::AuthenticationRequired,
            ballot_core::CoreError::Forbidden => ApiError::Forbidden,
            ballot_core::CoreError::NotFound => ApiError::NotFound,
            ballot_core::CoreError::Validation(err) => ApiError::Validation(err),
            ballot_core::CoreError::Database(_) => {
                ApiError::Internal(anyhow::anyhow!("database error"))
            }
            ballot_core::CoreError::Internal(msg) => ApiError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

impl From<ballot_db::DbError> for ApiError {
    fn from(e: ballot_db::DbError) -> Self {
        match e {
            ballot_db::DbError::NotFound => ApiError::NotFound,
            ballot_db::DbError::Sqlx(_) => ApiError::Internal(anyhow::anyhow!("database error")),
        }
    }
}

impl From<FieldError> for ApiError {
    fn from(e: FieldError) -> Self {
        ApiError::Validation(e)
    }
}
