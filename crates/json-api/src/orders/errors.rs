//! Order Errors

use dailybrew_app::domain::orders::OrdersServiceError;
use tracing::error;

use crate::response::ApiError;

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::NotFound => ApiError::not_found("Order not found"),
        OrdersServiceError::Sql(source) => {
            error!("order operation failed: {source}");

            ApiError::internal()
        }
        business => ApiError::bad_request(business.to_string()),
    }
}
