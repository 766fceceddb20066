//! Carts service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("Product not found")]
    ProductNotFound,

    #[error("Product is not available")]
    ProductUnavailable,

    #[error("Cart item not found")]
    ItemNotFound,

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("No fields to update")]
    NoFieldsToUpdate,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::ItemNotFound;
        }

        Self::Sql(error)
    }
}
