//! List All Returns Handler (staff)

use std::sync::Arc;

use dailybrew_app::domain::returns::models::ReturnStatus;
use salvo::prelude::*;

use crate::{
    extensions::{DepotExt, page_param},
    response::{ApiError, Envelope},
    returns::{errors::into_api_error, models::ReturnResponse},
    state::State,
};

const DEFAULT_PAGE_SIZE: u32 = 20;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<ReturnResponse>>>, ApiError> {
    let page = page_param(req, DEFAULT_PAGE_SIZE);

    let status = match req.query::<String>("status") {
        Some(raw) => Some(
            raw.parse::<ReturnStatus>()
                .map_err(|_parse_error| ApiError::bad_request("Invalid status"))?,
        ),
        None => None,
    };

    let state = depot.obtain_or_500::<Arc<State>>()?;
    depot.staff_or_403()?;

    let listed = state
        .app
        .returns
        .list_returns(status, page)
        .await
        .map_err(into_api_error)?;

    let returns = listed.items.into_iter().map(Into::into).collect();

    Ok(Json(Envelope::paginated(returns, page, listed.total)))
}

#[cfg(test)]
mod tests {
    use dailybrew_app::{domain::returns::MockReturnsService, pagination::PagedResult};
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, service_as_customer, service_as_staff};

    use super::*;

    #[tokio::test]
    async fn staff_filter_by_status() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns
            .expect_list_returns()
            .once()
            .withf(|status, _page| *status == Some(ReturnStatus::Pending))
            .return_once(|_, _| {
                Ok(PagedResult {
                    items: Vec::new(),
                    total: 0,
                })
            });

        let service = service_as_staff(
            Mocks {
                returns,
                ..Mocks::default()
            },
            Router::with_path("admin/returns").get(handler),
        );

        let res = TestClient::get("http://example.com/admin/returns?status=pending")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn customers_get_403() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns.expect_list_returns().never();

        let service = service_as_customer(
            Mocks {
                returns,
                ..Mocks::default()
            },
            Router::with_path("admin/returns").get(handler),
        );

        let res = TestClient::get("http://example.com/admin/returns")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
