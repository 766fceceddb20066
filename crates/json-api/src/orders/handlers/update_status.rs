//! Update Order Status Handler

use std::sync::Arc;

use dailybrew_app::domain::orders::{models::OrderUuid, status::OrderStatus};
use salvo::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    extensions::DepotExt,
    orders::errors::into_api_error,
    response::{ApiError, Envelope},
    state::State,
};

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateStatusRequest {
    pub status: String,
    pub notes: Option<String>,
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<()>>, ApiError> {
    let uuid = req
        .param::<Uuid>("uuid")
        .ok_or_else(|| ApiError::bad_request("Invalid order id"))?;

    let body: UpdateStatusRequest = req
        .parse_json()
        .await
        .map_err(|_parse_error| ApiError::bad_request("Invalid status"))?;

    let status = body
        .status
        .parse::<OrderStatus>()
        .map_err(|_parse_error| ApiError::bad_request("Invalid status"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.staff_or_403()?;

    state
        .app
        .orders
        .update_status(OrderUuid::from_uuid(uuid), status, actor.uuid, body.notes)
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::message("Order status updated successfully")))
}

#[cfg(test)]
mod tests {
    use dailybrew_app::domain::orders::{MockOrdersService, OrdersServiceError};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, service_as_customer, service_as_staff};

    use super::*;

    #[tokio::test]
    async fn staff_can_transition_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .withf(|_order, status, _actor, notes| {
                *status == OrderStatus::Completed && notes.as_deref() == Some("picked up")
            })
            .return_once(|_, _, _, _| Ok(()));

        let service = service_as_staff(
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("orders/{uuid}/status").put(handler),
        );

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            Uuid::now_v7()
        ))
        .json(&json!({ "status": "completed", "notes": "picked up" }))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn customers_get_403() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().never();

        let service = service_as_customer(
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("orders/{uuid}/status").put(handler),
        );

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            Uuid::now_v7()
        ))
        .json(&json!({ "status": "completed" }))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_status_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().never();

        let service = service_as_staff(
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("orders/{uuid}/status").put(handler),
        );

        let mut res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            Uuid::now_v7()
        ))
        .json(&json!({ "status": "shipped" }))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: Envelope<()> = res.take_json().await?;

        assert_eq!(body.message, "Invalid status");

        Ok(())
    }

    #[tokio::test]
    async fn strict_policy_violation_surfaces_as_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().once().return_once(|_, _, _, _| {
            Err(OrdersServiceError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Completed,
            })
        });

        let service = service_as_staff(
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("orders/{uuid}/status").put(handler),
        );

        let mut res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            Uuid::now_v7()
        ))
        .json(&json!({ "status": "completed" }))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: Envelope<()> = res.take_json().await?;

        assert_eq!(body.message, "Order cannot move from pending to completed");

        Ok(())
    }
}
