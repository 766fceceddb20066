//! Reply To Review Handler

use std::sync::Arc;

use dailybrew_app::domain::reviews::models::ReviewUuid;
use salvo::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    extensions::DepotExt,
    response::{ApiError, Envelope},
    reviews::errors::into_api_error,
    state::State,
};

#[derive(Debug, Deserialize)]
pub(crate) struct ReplyRequest {
    pub admin_reply: String,
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<()>>, ApiError> {
    let uuid = req
        .param::<Uuid>("uuid")
        .ok_or_else(|| ApiError::bad_request("Invalid review id"))?;

    let body: ReplyRequest = req
        .parse_json()
        .await
        .map_err(|_parse_error| ApiError::bad_request("Reply text is required"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    depot.staff_or_403()?;

    state
        .app
        .reviews
        .reply(ReviewUuid::from_uuid(uuid), body.admin_reply)
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::message("Reply added successfully")))
}

#[cfg(test)]
mod tests {
    use dailybrew_app::domain::reviews::MockReviewsService;
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, service_as_customer, service_as_staff};

    use super::*;

    #[tokio::test]
    async fn staff_can_reply() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_reply()
            .once()
            .withf(|_review, reply| reply == "Thanks!")
            .return_once(|_, _| Ok(()));

        let service = service_as_staff(
            Mocks {
                reviews,
                ..Mocks::default()
            },
            Router::with_path("reviews/{uuid}/reply").put(handler),
        );

        let res = TestClient::put(format!(
            "http://example.com/reviews/{}/reply",
            Uuid::now_v7()
        ))
        .json(&json!({ "admin_reply": "Thanks!" }))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn customers_cannot_reply() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews.expect_reply().never();

        let service = service_as_customer(
            Mocks {
                reviews,
                ..Mocks::default()
            },
            Router::with_path("reviews/{uuid}/reply").put(handler),
        );

        let res = TestClient::put(format!(
            "http://example.com/reviews/{}/reply",
            Uuid::now_v7()
        ))
        .json(&json!({ "admin_reply": "Thanks!" }))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
