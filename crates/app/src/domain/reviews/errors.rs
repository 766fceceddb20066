//! Reviews service errors.

use sqlx::{Error, error::DatabaseError, error::ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewsServiceError {
    #[error("Rating must be between 1 and 5")]
    InvalidRating,

    #[error("You have not ordered this product")]
    NotOrdered,

    #[error("You have already reviewed this product for this order")]
    AlreadyReviewed,

    #[error("Review not found")]
    NotFound,

    #[error("Product not found")]
    ProductNotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ReviewsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyReviewed,
            Some(ErrorKind::ForeignKeyViolation) => Self::ProductNotFound,
            _ => Self::Sql(error),
        }
    }
}
