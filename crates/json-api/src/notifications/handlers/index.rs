//! List Notifications Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::{DepotExt, page_param},
    notifications::{errors::into_api_error, models::NotificationResponse},
    response::{ApiError, Envelope},
    state::State,
};

const DEFAULT_PAGE_SIZE: u32 = 20;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<NotificationResponse>>>, ApiError> {
    let page = page_param(req, DEFAULT_PAGE_SIZE);

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let listed = state
        .app
        .notifications
        .list(user.uuid, page)
        .await
        .map_err(into_api_error)?;

    let notifications = listed.items.into_iter().map(Into::into).collect();

    Ok(Json(Envelope::paginated(notifications, page, listed.total)))
}
