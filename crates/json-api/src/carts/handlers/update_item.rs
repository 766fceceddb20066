//! Update Cart Item Handler

use std::sync::Arc;

use dailybrew_app::domain::carts::models::{CartItemUpdate, CartItemUuid};
use salvo::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    carts::{errors::into_api_error, models::CartItemResponse},
    extensions::DepotExt,
    response::{ApiError, Envelope},
    state::State,
};

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateCartItemRequest {
    pub quantity: Option<u32>,
    pub notes: Option<String>,
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<CartItemResponse>>, ApiError> {
    let uuid = req
        .param::<Uuid>("uuid")
        .ok_or_else(|| ApiError::bad_request("Invalid cart item id"))?;

    let body: UpdateCartItemRequest = req
        .parse_json()
        .await
        .map_err(|_parse_error| ApiError::bad_request("Invalid request body"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let item = state
        .app
        .carts
        .update_item(
            user.uuid,
            CartItemUuid::from_uuid(uuid),
            CartItemUpdate {
                quantity: body.quantity,
                notes: body.notes,
            },
        )
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::ok(item.into())))
}
