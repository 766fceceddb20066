//! Payment Proof Handler

use std::sync::Arc;

use dailybrew_app::domain::orders::models::OrderUuid;
use salvo::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    extensions::DepotExt,
    orders::errors::into_api_error,
    response::{ApiError, Envelope},
    state::State,
};

/// The proof is a stored-file reference; upload handling lives outside
/// this service.
#[derive(Debug, Deserialize)]
pub(crate) struct PaymentProofRequest {
    pub payment_proof: String,
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<()>>, ApiError> {
    let uuid = req
        .param::<Uuid>("uuid")
        .ok_or_else(|| ApiError::bad_request("Invalid order id"))?;

    let body: PaymentProofRequest = req
        .parse_json()
        .await
        .map_err(|_parse_error| ApiError::bad_request("Payment proof is required"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    state
        .app
        .orders
        .attach_payment_proof(OrderUuid::from_uuid(uuid), user.uuid, body.payment_proof)
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::message(
        "Payment proof uploaded successfully",
    )))
}
