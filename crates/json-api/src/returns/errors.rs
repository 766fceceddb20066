//! Return Errors

use dailybrew_app::domain::returns::ReturnsServiceError;
use tracing::error;

use crate::response::ApiError;

pub(crate) fn into_api_error(error: ReturnsServiceError) -> ApiError {
    match error {
        ReturnsServiceError::OrderNotFound => ApiError::not_found("Order not found"),
        ReturnsServiceError::NotFound => ApiError::not_found("Return not found"),
        ReturnsServiceError::Sql(source) => {
            error!("return operation failed: {source}");

            ApiError::internal()
        }
        business => ApiError::bad_request(business.to_string()),
    }
}
