use crate::validation::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("authentication required")]
    AuthenticationRequired,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Validation(#[from] FieldError),
    #[error("database error: {0}")]
    Database(#[from] ballot_db::DbError),
    #[error("internal error: {0}")]
    Internal(String),
}
