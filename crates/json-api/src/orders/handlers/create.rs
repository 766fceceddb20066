//! Create Order Handler

use std::sync::Arc;

use dailybrew_app::domain::orders::{models::NewOrder, status::DeliveryMethod};
use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::DepotExt,
    orders::errors::into_api_error,
    response::{ApiError, Envelope},
    state::State,
};

#[derive(Debug, Deserialize)]
pub(crate) struct CreateOrderRequest {
    pub delivery_method: String,
    pub delivery_address: Option<String>,
    pub payment_method: Option<String>,
    pub redeem_code: Option<String>,
    #[serde(default)]
    pub points_used: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct OrderCreatedResponse {
    pub uuid: Uuid,
    pub order_number: String,
    pub total: u64,
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<OrderCreatedResponse>>, ApiError> {
    let body: CreateOrderRequest = req
        .parse_json()
        .await
        .map_err(|_parse_error| ApiError::bad_request("Invalid delivery method"))?;

    let delivery_method = body
        .delivery_method
        .parse::<DeliveryMethod>()
        .map_err(|_parse_error| ApiError::bad_request("Invalid delivery method"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let created = state
        .app
        .orders
        .create_order(
            user.uuid,
            NewOrder {
                delivery_method,
                delivery_address: body.delivery_address,
                payment_method: body.payment_method,
                redeem_code: body.redeem_code,
                points_used: body.points_used,
            },
        )
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(Envelope::created(
        OrderCreatedResponse {
            uuid: created.uuid.into_uuid(),
            order_number: created.order_number,
            total: created.total,
        },
        "Order created successfully",
    )))
}

#[cfg(test)]
mod tests {
    use dailybrew_app::domain::orders::{
        MockOrdersService, OrdersServiceError,
        models::{CreatedOrder, OrderUuid},
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, service_as_customer};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        service_as_customer(
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("orders").post(handler),
        )
    }

    #[tokio::test]
    async fn checkout_returns_201_with_totals() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(|_user, new| {
                new.delivery_method == DeliveryMethod::Takeaway
                    && new.redeem_code.as_deref() == Some("SAVE10")
                    && new.points_used == 0
            })
            .return_once(move |_, _| {
                Ok(CreatedOrder {
                    uuid,
                    order_number: "DC17000000000000001234".to_string(),
                    total: 47_000,
                })
            });

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({ "delivery_method": "takeaway", "redeem_code": "SAVE10" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: Envelope<OrderCreatedResponse> = res.take_json().await?;

        assert!(body.success);
        assert_eq!(body.status_code, 201);

        let data = body.data.expect("created order payload");

        assert_eq!(data.uuid, uuid.into_uuid());
        assert_eq!(data.total, 47_000);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_delivery_method_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_create_order().never();

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({ "delivery_method": "teleport" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: Envelope<OrderCreatedResponse> = res.take_json().await?;

        assert!(!body.success);
        assert_eq!(body.message, "Invalid delivery method");

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_surfaces_the_business_message() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::EmptyCart));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({ "delivery_method": "dine_in" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: Envelope<OrderCreatedResponse> = res.take_json().await?;

        assert_eq!(body.message, "Cart is empty");

        Ok(())
    }

    #[tokio::test]
    async fn storage_errors_stay_generic() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::Sql(sqlx_like_error())));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({ "delivery_method": "dine_in" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        let body: Envelope<OrderCreatedResponse> = res.take_json().await?;

        assert_eq!(body.message, "Internal server error");

        Ok(())
    }

    fn sqlx_like_error() -> sqlx::Error {
        sqlx::Error::PoolClosed
    }
}
