//! Product Reviews Handler

use std::sync::Arc;

use dailybrew_app::domain::products::models::ProductUuid;
use salvo::prelude::*;
use uuid::Uuid;

use crate::{
    extensions::DepotExt,
    response::{ApiError, Envelope},
    reviews::{errors::into_api_error, models::ReviewResponse},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<ReviewResponse>>>, ApiError> {
    let uuid = req
        .param::<Uuid>("uuid")
        .ok_or_else(|| ApiError::bad_request("Invalid product id"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let reviews = state
        .app
        .reviews
        .product_reviews(ProductUuid::from_uuid(uuid))
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::ok(
        reviews.into_iter().map(Into::into).collect(),
    )))
}

#[cfg(test)]
mod tests {
    use dailybrew_app::domain::reviews::MockReviewsService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, service_public};

    use super::*;

    #[tokio::test]
    async fn lists_visible_reviews() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_product_reviews()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let service = service_public(
            Mocks {
                reviews,
                ..Mocks::default()
            },
            Router::with_path("products/{uuid}/reviews").get(handler),
        );

        let mut res = TestClient::get(format!(
            "http://example.com/products/{}/reviews",
            Uuid::now_v7()
        ))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Envelope<Vec<ReviewResponse>> = res.take_json().await?;

        assert!(body.success);
        assert_eq!(body.data.map(|d| d.len()), Some(0));

        Ok(())
    }
}
