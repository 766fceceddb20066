//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::errors::into_api_error,
    extensions::DepotExt,
    response::{ApiError, Envelope},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Envelope<()>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    state
        .app
        .carts
        .clear(user.uuid)
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::message("Cart cleared successfully")))
}

#[cfg(test)]
mod tests {
    use dailybrew_app::domain::carts::MockCartsService;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, service_as_customer};

    use super::*;

    #[tokio::test]
    async fn clear_reports_success() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_clear().once().return_once(|_| Ok(()));

        let service = service_as_customer(
            Mocks {
                carts,
                ..Mocks::default()
            },
            Router::with_path("cart").delete(handler),
        );

        let res = TestClient::delete("http://example.com/cart").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
