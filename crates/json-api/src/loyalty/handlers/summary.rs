//! Loyalty Summary Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::{DepotExt, page_param},
    loyalty::{errors::into_api_error, models::LoyaltySummaryResponse},
    response::{ApiError, Envelope},
    state::State,
};

const DEFAULT_PAGE_SIZE: u32 = 20;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<LoyaltySummaryResponse>>, ApiError> {
    let page = page_param(req, DEFAULT_PAGE_SIZE);

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let summary = state
        .app
        .loyalty
        .summary(user.uuid, page)
        .await
        .map_err(into_api_error)?;

    let total = summary.total_transactions;

    Ok(Json(Envelope::paginated(summary.into(), page, total)))
}

#[cfg(test)]
mod tests {
    use dailybrew_app::domain::loyalty::{MockLoyaltyService, models::LoyaltySummary};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, service_as_customer};

    use super::*;

    #[tokio::test]
    async fn reports_balance_and_history() -> TestResult {
        let mut loyalty = MockLoyaltyService::new();

        loyalty.expect_summary().once().return_once(|_, _| {
            Ok(LoyaltySummary {
                balance: 470,
                transactions: Vec::new(),
                total_transactions: 0,
            })
        });

        let service = service_as_customer(
            Mocks {
                loyalty,
                ..Mocks::default()
            },
            Router::with_path("loyalty").get(handler),
        );

        let mut res = TestClient::get("http://example.com/loyalty").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Envelope<LoyaltySummaryResponse> = res.take_json().await?;

        assert_eq!(body.data.map(|d| d.balance), Some(470));

        Ok(())
    }
}
