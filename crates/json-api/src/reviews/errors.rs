//! Review Errors

use dailybrew_app::domain::reviews::ReviewsServiceError;
use tracing::error;

use crate::response::ApiError;

pub(crate) fn into_api_error(error: ReviewsServiceError) -> ApiError {
    match error {
        ReviewsServiceError::NotFound => ApiError::not_found("Review not found"),
        ReviewsServiceError::ProductNotFound => ApiError::not_found("Product not found"),
        ReviewsServiceError::Sql(source) => {
            error!("review operation failed: {source}");

            ApiError::internal()
        }
        business => ApiError::bad_request(business.to_string()),
    }
}
