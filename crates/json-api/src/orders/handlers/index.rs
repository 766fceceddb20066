//! List Orders Handler

use std::sync::Arc;

use dailybrew_app::domain::orders::status::OrderStatus;
use salvo::prelude::*;

use crate::{
    extensions::{DepotExt, page_param},
    orders::{errors::into_api_error, models::OrderResponse},
    response::{ApiError, Envelope},
    state::State,
};

const DEFAULT_PAGE_SIZE: u32 = 10;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<OrderResponse>>>, ApiError> {
    let page = page_param(req, DEFAULT_PAGE_SIZE);

    let status = match req.query::<String>("status") {
        Some(raw) => Some(
            raw.parse::<OrderStatus>()
                .map_err(|_parse_error| ApiError::bad_request("Invalid status"))?,
        ),
        None => None,
    };

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let listed = state
        .app
        .orders
        .list_orders(user.uuid, status, page)
        .await
        .map_err(into_api_error)?;

    let orders = listed.items.into_iter().map(Into::into).collect();

    Ok(Json(Envelope::paginated(orders, page, listed.total)))
}
