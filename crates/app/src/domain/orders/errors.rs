//! Orders service errors.
//!
//! Business-rule messages surface verbatim to the caller; storage errors
//! stay generic at the boundary.

use sqlx::{Error, error::DatabaseError};
use thiserror::Error;

use crate::domain::{loyalty::errors::InsufficientPoints, orders::status::OrderStatus};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Product \"{0}\" is not available")]
    ProductUnavailable(String),

    #[error("Insufficient stock for \"{0}\"")]
    InsufficientStock(String),

    #[error("Delivery address is required")]
    DeliveryAddressRequired,

    #[error("Insufficient loyalty points")]
    InsufficientPoints,

    #[error("Order not found")]
    NotFound,

    #[error("Payment already confirmed")]
    PaymentAlreadyConfirmed,

    #[error("Order cannot move from {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}

impl From<InsufficientPoints> for OrdersServiceError {
    fn from(_: InsufficientPoints) -> Self {
        Self::InsufficientPoints
    }
}

/// Whether the error is a unique violation on the named constraint.
pub(crate) fn is_unique_violation(error: &OrdersServiceError, constraint: &str) -> bool {
    let OrdersServiceError::Sql(sql_error) = error else {
        return false;
    };

    sql_error
        .as_database_error()
        .and_then(DatabaseError::constraint)
        .is_some_and(|violated| violated == constraint)
}
