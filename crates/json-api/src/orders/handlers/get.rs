//! Get Order Handler

use std::sync::Arc;

use dailybrew_app::domain::orders::models::OrderUuid;
use salvo::prelude::*;
use uuid::Uuid;

use crate::{
    extensions::DepotExt,
    orders::{errors::into_api_error, models::OrderDetailsResponse},
    response::{ApiError, Envelope},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<OrderDetailsResponse>>, ApiError> {
    let uuid = req
        .param::<Uuid>("uuid")
        .ok_or_else(|| ApiError::bad_request("Invalid order id"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    // Staff can inspect any order; customers only their own.
    let owner = if user.role.is_staff() {
        None
    } else {
        Some(user.uuid)
    };

    let details = state
        .app
        .orders
        .get_order(OrderUuid::from_uuid(uuid), owner)
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::ok(details.into())))
}
