//! Create Review Handler

use std::sync::Arc;

use dailybrew_app::domain::{
    orders::models::OrderUuid,
    products::models::ProductUuid,
    reviews::models::NewReview,
};
use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::DepotExt,
    response::{ApiError, Envelope},
    reviews::errors::into_api_error,
    state::State,
};

#[derive(Debug, Deserialize)]
pub(crate) struct CreateReviewRequest {
    pub product_uuid: Uuid,
    pub order_uuid: Option<Uuid>,
    pub rating: i16,
    pub comment: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ReviewCreatedResponse {
    pub uuid: Uuid,
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<ReviewCreatedResponse>>, ApiError> {
    let body: CreateReviewRequest = req
        .parse_json()
        .await
        .map_err(|_parse_error| ApiError::bad_request("Product ID and rating are required"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let uuid = state
        .app
        .reviews
        .create_review(
            user.uuid,
            NewReview {
                product_uuid: ProductUuid::from_uuid(body.product_uuid),
                order_uuid: body.order_uuid.map(OrderUuid::from_uuid),
                rating: body.rating,
                comment: body.comment,
                images: body.images,
            },
        )
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(Envelope::created(
        ReviewCreatedResponse {
            uuid: uuid.into_uuid(),
        },
        "Review submitted successfully",
    )))
}
