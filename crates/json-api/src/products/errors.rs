//! Product Errors

use dailybrew_app::domain::products::ProductsServiceError;
use tracing::error;

use crate::response::ApiError;

pub(crate) fn into_api_error(error: ProductsServiceError) -> ApiError {
    match error {
        ProductsServiceError::NotFound => ApiError::not_found("Product not found"),
        ProductsServiceError::Sql(source) => {
            error!("product lookup failed: {source}");

            ApiError::internal()
        }
    }
}
