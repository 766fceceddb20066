//! Returns service errors.

use sqlx::{Error, error::DatabaseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReturnsServiceError {
    #[error("Order not found")]
    OrderNotFound,

    #[error("Can only return completed orders")]
    OrderNotCompleted,

    #[error("Return request already exists for this order")]
    AlreadyExists,

    #[error("Proof images are required")]
    EvidenceRequired,

    #[error("Order item not found")]
    ItemNotFound,

    #[error("Invalid status")]
    InvalidStatus,

    #[error("Return not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ReturnsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        // The per-order unique constraint backs the duplicate-return check.
        if error
            .as_database_error()
            .and_then(DatabaseError::constraint)
            == Some("returns_order_uuid_key")
        {
            return Self::AlreadyExists;
        }

        Self::Sql(error)
    }
}

/// Whether the error is a unique violation on the named constraint.
pub(crate) fn is_unique_violation(error: &ReturnsServiceError, constraint: &str) -> bool {
    let ReturnsServiceError::Sql(sql_error) = error else {
        return false;
    };

    sql_error
        .as_database_error()
        .and_then(DatabaseError::constraint)
        .is_some_and(|violated| violated == constraint)
}
