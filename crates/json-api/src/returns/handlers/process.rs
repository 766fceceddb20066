//! Process Return Handler

use std::sync::Arc;

use dailybrew_app::domain::returns::models::{ReturnDecision, ReturnStatus, ReturnUuid};
use salvo::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    extensions::DepotExt,
    response::{ApiError, Envelope},
    returns::errors::into_api_error,
    state::State,
};

#[derive(Debug, Deserialize)]
pub(crate) struct ProcessReturnRequest {
    pub status: String,
    pub admin_notes: Option<String>,
    pub refund_amount: Option<u64>,
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<()>>, ApiError> {
    let uuid = req
        .param::<Uuid>("uuid")
        .ok_or_else(|| ApiError::bad_request("Invalid return id"))?;

    let body: ProcessReturnRequest = req
        .parse_json()
        .await
        .map_err(|_parse_error| ApiError::bad_request("Invalid status"))?;

    let status = body
        .status
        .parse::<ReturnStatus>()
        .map_err(|_parse_error| ApiError::bad_request("Invalid status"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.staff_or_403()?;

    state
        .app
        .returns
        .process_return(
            ReturnUuid::from_uuid(uuid),
            actor.uuid,
            ReturnDecision {
                status,
                admin_notes: body.admin_notes,
                refund_amount: body.refund_amount,
            },
        )
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::message("Return processed successfully")))
}
