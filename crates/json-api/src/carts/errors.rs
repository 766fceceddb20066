//! Cart Errors

use dailybrew_app::domain::carts::CartsServiceError;
use tracing::error;

use crate::response::ApiError;

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::ProductNotFound => ApiError::not_found("Product not found"),
        CartsServiceError::ItemNotFound => ApiError::not_found("Cart item not found"),
        CartsServiceError::Sql(source) => {
            error!("cart operation failed: {source}");

            ApiError::internal()
        }
        business => ApiError::bad_request(business.to_string()),
    }
}
