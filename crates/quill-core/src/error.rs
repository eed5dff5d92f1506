//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::FieldErrors;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} not found")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("No {0} found")]
    EmptyCollection(&'static str),

    #[error("{0}")]
    Validation(FieldErrors),

    /// A write failed; the message is the store's own text.
    #[error("{0}")]
    Internal(String),

    /// A failure nobody handled on purpose.
    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl From<FieldErrors> for DomainError {
    fn from(errors: FieldErrors) -> Self {
        DomainError::Validation(errors)
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
