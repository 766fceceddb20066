//! Create Return Handler

use std::sync::Arc;

use dailybrew_app::domain::{
    orders::models::{OrderItemUuid, OrderUuid},
    returns::models::NewReturn,
};
use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::DepotExt,
    response::{ApiError, Envelope},
    returns::errors::into_api_error,
    state::State,
};

#[derive(Debug, Deserialize)]
pub(crate) struct CreateReturnRequest {
    pub order_uuid: Uuid,
    pub reason: String,
    pub description: String,
    /// Stored evidence image references; at least one is required.
    #[serde(default)]
    pub images: Vec<String>,
    /// Order items to return; omit to return every item.
    #[serde(default)]
    pub items: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ReturnCreatedResponse {
    pub uuid: Uuid,
    pub return_number: String,
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<ReturnCreatedResponse>>, ApiError> {
    let body: CreateReturnRequest = req.parse_json().await.map_err(|_parse_error| {
        ApiError::bad_request("Order ID, reason, and description are required")
    })?;

    if body.reason.trim().is_empty() || body.description.trim().is_empty() {
        return Err(ApiError::bad_request(
            "Order ID, reason, and description are required",
        ));
    }

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let created = state
        .app
        .returns
        .create_return(
            user.uuid,
            NewReturn {
                order_uuid: OrderUuid::from_uuid(body.order_uuid),
                reason: body.reason,
                description: body.description,
                images: body.images,
                items: body.items.into_iter().map(OrderItemUuid::from_uuid).collect(),
            },
        )
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(Envelope::created(
        ReturnCreatedResponse {
            uuid: created.uuid.into_uuid(),
            return_number: created.return_number,
        },
        "Return request created successfully",
    )))
}

#[cfg(test)]
mod tests {
    use dailybrew_app::domain::returns::{
        MockReturnsService, ReturnsServiceError,
        models::{CreatedReturn, ReturnUuid},
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, service_as_customer};

    use super::*;

    fn make_service(returns: MockReturnsService) -> Service {
        service_as_customer(
            Mocks {
                returns,
                ..Mocks::default()
            },
            Router::with_path("returns").post(handler),
        )
    }

    #[tokio::test]
    async fn valid_request_returns_201() -> TestResult {
        let uuid = ReturnUuid::new();

        let mut returns = MockReturnsService::new();

        returns
            .expect_create_return()
            .once()
            .withf(|_user, new| new.images.len() == 1 && new.items.is_empty())
            .return_once(move |_, _| {
                Ok(CreatedReturn {
                    uuid,
                    return_number: "RT17000000000000005678".to_string(),
                })
            });

        let mut res = TestClient::post("http://example.com/returns")
            .json(&json!({
                "order_uuid": Uuid::now_v7(),
                "reason": "damaged",
                "description": "Cup arrived cracked",
                "images": ["uploads/evidence-1.jpg"],
            }))
            .send(&make_service(returns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: Envelope<ReturnCreatedResponse> = res.take_json().await?;
        let data = body.data.expect("created return payload");

        assert_eq!(data.uuid, uuid.into_uuid());
        assert!(data.return_number.starts_with("RT"));

        Ok(())
    }

    #[tokio::test]
    async fn missing_reason_returns_400() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns.expect_create_return().never();

        let res = TestClient::post("http://example.com/returns")
            .json(&json!({
                "order_uuid": Uuid::now_v7(),
                "reason": "",
                "description": "Cup arrived cracked",
                "images": ["uploads/evidence-1.jpg"],
            }))
            .send(&make_service(returns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_return_surfaces_the_business_message() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns
            .expect_create_return()
            .once()
            .return_once(|_, _| Err(ReturnsServiceError::AlreadyExists));

        let mut res = TestClient::post("http://example.com/returns")
            .json(&json!({
                "order_uuid": Uuid::now_v7(),
                "reason": "damaged",
                "description": "Cup arrived cracked",
                "images": ["uploads/evidence-1.jpg"],
            }))
            .send(&make_service(returns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: Envelope<ReturnCreatedResponse> = res.take_json().await?;

        assert_eq!(body.message, "Return request already exists for this order");

        Ok(())
    }
}
