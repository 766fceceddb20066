//! App Context

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        loyalty::{LoyaltyService, PgLoyaltyService},
        notifications::{NotificationsService, PgNotificationsService},
        orders::{OrdersService, PgOrdersService, TransitionPolicy},
        products::{PgProductsService, ProductsService},
        returns::{PgReturnsService, ReturnsService},
        reviews::{PgReviewsService, ReviewsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub loyalty: Arc<dyn LoyaltyService>,
    pub returns: Arc<dyn ReturnsService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub notifications: Arc<dyn NotificationsService>,
}

impl AppContext {
    /// Build application context on an existing pool.
    #[must_use]
    pub fn new(pool: PgPool, transition_policy: TransitionPolicy) -> Self {
        let db = Db::new(pool.clone());

        Self {
            auth: Arc::new(PgAuthService::new(pool)),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone(), transition_policy)),
            loyalty: Arc::new(PgLoyaltyService::new(db.clone())),
            returns: Arc::new(PgReturnsService::new(db.clone())),
            reviews: Arc::new(PgReviewsService::new(db.clone())),
            notifications: Arc::new(PgNotificationsService::new(db)),
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        transition_policy: TransitionPolicy,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url).await.map_err(AppInitError::Database)?;

        Ok(Self::new(pool, transition_policy))
    }
}
