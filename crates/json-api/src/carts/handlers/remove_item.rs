//! Remove Cart Item Handler

use std::sync::Arc;

use dailybrew_app::domain::carts::models::CartItemUuid;
use salvo::prelude::*;
use uuid::Uuid;

use crate::{
    carts::errors::into_api_error,
    extensions::DepotExt,
    response::{ApiError, Envelope},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<()>>, ApiError> {
    let uuid = req
        .param::<Uuid>("uuid")
        .ok_or_else(|| ApiError::bad_request("Invalid cart item id"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    state
        .app
        .carts
        .remove_item(user.uuid, CartItemUuid::from_uuid(uuid))
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::message("Item removed from cart")))
}
