//! Loyalty service errors.

use sqlx::Error;
use thiserror::Error;

/// A redemption asked for more points than the balance holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Insufficient loyalty points")]
pub struct InsufficientPoints;

#[derive(Debug, Error)]
pub enum LoyaltyServiceError {
    #[error("User not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for LoyaltyServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
