//! Notification Errors

use dailybrew_app::domain::notifications::NotificationsServiceError;
use tracing::error;

use crate::response::ApiError;

pub(crate) fn into_api_error(error: NotificationsServiceError) -> ApiError {
    match error {
        NotificationsServiceError::NotFound => ApiError::not_found("Notification not found"),
        NotificationsServiceError::Sql(source) => {
            error!("notification operation failed: {source}");

            ApiError::internal()
        }
    }
}
