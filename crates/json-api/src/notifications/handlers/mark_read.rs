//! Mark Notification Read Handler

use std::sync::Arc;

use dailybrew_app::domain::notifications::models::NotificationUuid;
use salvo::prelude::*;
use uuid::Uuid;

use crate::{
    extensions::DepotExt,
    notifications::errors::into_api_error,
    response::{ApiError, Envelope},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<()>>, ApiError> {
    let uuid = req
        .param::<Uuid>("uuid")
        .ok_or_else(|| ApiError::bad_request("Invalid notification id"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    state
        .app
        .notifications
        .mark_read(user.uuid, NotificationUuid::from_uuid(uuid))
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::message("Notification marked as read")))
}

#[cfg(test)]
mod tests {
    use dailybrew_app::domain::notifications::{
        MockNotificationsService, NotificationsServiceError,
    };
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, service_as_customer};

    use super::*;

    #[tokio::test]
    async fn foreign_notification_is_not_found() -> TestResult {
        let mut notifications = MockNotificationsService::new();

        notifications
            .expect_mark_read()
            .once()
            .return_once(|_, _| Err(NotificationsServiceError::NotFound));

        let service = service_as_customer(
            Mocks {
                notifications,
                ..Mocks::default()
            },
            Router::with_path("notifications/{uuid}/read").put(handler),
        );

        let res = TestClient::put(format!(
            "http://example.com/notifications/{}/read",
            Uuid::now_v7()
        ))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
