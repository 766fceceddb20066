//! Get Product Handler

use std::sync::Arc;

use dailybrew_app::domain::products::models::ProductUuid;
use salvo::prelude::*;
use uuid::Uuid;

use crate::{
    extensions::DepotExt,
    products::{errors::into_api_error, models::ProductDetailsResponse},
    response::{ApiError, Envelope},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<ProductDetailsResponse>>, ApiError> {
    let uuid = req
        .param::<Uuid>("uuid")
        .ok_or_else(|| ApiError::bad_request("Invalid product id"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let details = state
        .app
        .products
        .get_product(ProductUuid::from_uuid(uuid))
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::ok(details.into())))
}
