//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_api_error, models::CartResponse},
    extensions::DepotExt,
    response::{ApiError, Envelope},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Envelope<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(user.uuid)
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::ok(cart.into())))
}
