//! Repository Module
//!
//! Row-level CRUD over the SQLite tables. Functions take any
//! `SqliteExecutor` so the lifecycle components can run them inside their
//! own transactions; multi-statement helpers take `&mut SqliteConnection`.

pub mod account;
pub mod fulfillment;
pub mod invoice;
pub mod ledger;
pub mod order;
pub mod payment;
pub mod payment_method;
pub mod store;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
