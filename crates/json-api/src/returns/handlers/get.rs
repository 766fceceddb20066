//! Get Return Handler

use std::sync::Arc;

use dailybrew_app::domain::returns::models::ReturnUuid;
use salvo::prelude::*;
use uuid::Uuid;

use crate::{
    extensions::DepotExt,
    response::{ApiError, Envelope},
    returns::{errors::into_api_error, models::ReturnDetailsResponse},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<ReturnDetailsResponse>>, ApiError> {
    let uuid = req
        .param::<Uuid>("uuid")
        .ok_or_else(|| ApiError::bad_request("Invalid return id"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let owner = if user.role.is_staff() {
        None
    } else {
        Some(user.uuid)
    };

    let details = state
        .app
        .returns
        .get_return(ReturnUuid::from_uuid(uuid), owner)
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::ok(details.into())))
}

#[cfg(test)]
mod tests {
    use dailybrew_app::domain::returns::{MockReturnsService, ReturnsServiceError};
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, service_as_customer};

    use super::*;

    #[tokio::test]
    async fn foreign_return_is_not_found() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns
            .expect_get_return()
            .once()
            .withf(|_retrn, owner| owner.is_some())
            .return_once(|_, _| Err(ReturnsServiceError::NotFound));

        let service = service_as_customer(
            Mocks {
                returns,
                ..Mocks::default()
            },
            Router::with_path("returns/{uuid}").get(handler),
        );

        let res = TestClient::get(format!("http://example.com/returns/{}", Uuid::now_v7()))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
