//! List Own Returns Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::{DepotExt, page_param},
    response::{ApiError, Envelope},
    returns::{errors::into_api_error, models::ReturnResponse},
    state::State,
};

const DEFAULT_PAGE_SIZE: u32 = 10;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<ReturnResponse>>>, ApiError> {
    let page = page_param(req, DEFAULT_PAGE_SIZE);

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let listed = state
        .app
        .returns
        .list_user_returns(user.uuid, page)
        .await
        .map_err(into_api_error)?;

    let returns = listed.items.into_iter().map(Into::into).collect();

    Ok(Json(Envelope::paginated(returns, page, listed.total)))
}
