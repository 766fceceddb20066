//! Add Cart Item Handler

use std::sync::Arc;

use dailybrew_app::domain::{carts::models::NewCartItem, products::models::ProductUuid};
use salvo::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    carts::{errors::into_api_error, models::CartItemResponse},
    extensions::DepotExt,
    response::{ApiError, Envelope},
    state::State,
};

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddCartItemRequest {
    pub product_uuid: Uuid,
    pub size_variant: Option<String>,
    pub temperature_variant: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub notes: Option<String>,
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<CartItemResponse>>, ApiError> {
    let body: AddCartItemRequest = req
        .parse_json()
        .await
        .map_err(|_parse_error| ApiError::bad_request("Product ID is required"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let item = state
        .app
        .carts
        .add_item(
            user.uuid,
            NewCartItem {
                product_uuid: ProductUuid::from_uuid(body.product_uuid),
                size_variant: body.size_variant,
                temperature_variant: body.temperature_variant,
                quantity: body.quantity,
                notes: body.notes,
            },
        )
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(Envelope::created(item.into(), "Item added to cart")))
}

#[cfg(test)]
mod tests {
    use dailybrew_app::domain::carts::{CartsServiceError, MockCartsService, models::CartItem};
    use dailybrew_app::domain::{
        carts::models::CartItemUuid, products::models::ProductUuid, users::models::UserUuid,
    };
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, service_as_customer};

    use super::*;

    fn make_item(product: ProductUuid, quantity: u32) -> CartItem {
        CartItem {
            uuid: CartItemUuid::new(),
            user_uuid: UserUuid::from_uuid(TEST_USER_UUID),
            product_uuid: product,
            product_name: "Latte".to_string(),
            image: None,
            is_available: true,
            size_variant: None,
            temperature_variant: None,
            quantity,
            unit_price: 25_000,
            notes: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn make_service(carts: MockCartsService) -> Service {
        service_as_customer(
            Mocks {
                carts,
                ..Mocks::default()
            },
            Router::with_path("cart/items").post(handler),
        )
    }

    #[tokio::test]
    async fn quantity_defaults_to_one() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |_user, item| item.product_uuid == product && item.quantity == 1)
            .return_once(move |_, _| Ok(make_item(product, 1)));

        let mut res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": product.into_uuid() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: Envelope<CartItemResponse> = res.take_json().await?;

        assert_eq!(body.data.map(|item| item.quantity), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn unavailable_product_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::ProductUnavailable));

        let mut res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": Uuid::now_v7() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: Envelope<CartItemResponse> = res.take_json().await?;

        assert_eq!(body.message, "Product is not available");

        Ok(())
    }

    #[tokio::test]
    async fn missing_body_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({}))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
