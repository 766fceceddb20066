//! List Products Handler

use std::sync::Arc;

use dailybrew_app::domain::products::models::ProductFilter;
use salvo::prelude::*;

use crate::{
    extensions::{DepotExt, page_param},
    products::{errors::into_api_error, models::ProductResponse},
    response::{ApiError, Envelope},
    state::State,
};

const DEFAULT_PAGE_SIZE: u32 = 20;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<ProductResponse>>>, ApiError> {
    let page = page_param(req, DEFAULT_PAGE_SIZE);

    let filter = ProductFilter {
        search: req.query::<String>("search"),
        featured: req.query::<bool>("is_featured").unwrap_or(false),
    };

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let listed = state
        .app
        .products
        .list_products(filter, page)
        .await
        .map_err(into_api_error)?;

    let products = listed.items.into_iter().map(Into::into).collect();

    Ok(Json(Envelope::paginated(products, page, listed.total)))
}
