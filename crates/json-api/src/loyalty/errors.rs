//! Loyalty Errors

use dailybrew_app::domain::loyalty::LoyaltyServiceError;
use tracing::error;

use crate::response::ApiError;

pub(crate) fn into_api_error(error: LoyaltyServiceError) -> ApiError {
    match error {
        LoyaltyServiceError::NotFound => ApiError::not_found("User not found"),
        LoyaltyServiceError::Sql(source) => {
            error!("loyalty lookup failed: {source}");

            ApiError::internal()
        }
    }
}
