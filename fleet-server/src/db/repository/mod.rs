//! Repository Module
//!
//! CRUD operations over the SQLite pool. Repositories are free async
//! functions; multi-row workflows (the seat-diagram provisioner, the
//! amenity set-replace) compose the `*_tx` helpers inside a single
//! `pool.begin()` transaction.

// Catalogue
pub mod amenity;
pub mod bus_model;
pub mod diagram_model;
pub mod diagram_model_zone;
pub mod seat_model;

// Fleet
pub mod bus;
pub mod bus_seat;
pub mod seat_diagram;
pub mod seat_diagram_zone;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Still referenced: {0}")]
    Referenced(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.to_string());
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        use crate::utils::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Referenced(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
