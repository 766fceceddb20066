//! Auth service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("token not recognized")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for AuthServiceError {
    fn from(error: sqlx::Error) -> Self {
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
