//! Depot helper extensions.

use std::any::Any;

use dailybrew_app::auth::AuthenticatedUser;
use salvo::Depot;

use crate::response::ApiError;

const CURRENT_USER_KEY: &str = "current_user";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn insert_current_user(&mut self, user: AuthenticatedUser);

    /// The authenticated account, or a 401 when the middleware did not run.
    fn current_user_or_401(&self) -> Result<AuthenticatedUser, ApiError>;

    /// The authenticated account when it has staff access, 403 otherwise.
    fn staff_or_403(&self) -> Result<AuthenticatedUser, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| ApiError::internal())
    }

    fn insert_current_user(&mut self, user: AuthenticatedUser) {
        self.insert(CURRENT_USER_KEY, user);
    }

    fn current_user_or_401(&self) -> Result<AuthenticatedUser, ApiError> {
        self.get::<AuthenticatedUser>(CURRENT_USER_KEY)
            .map(|user| *user)
            .map_err(|_ignored| ApiError::unauthorized("Authentication required"))
    }

    fn staff_or_403(&self) -> Result<AuthenticatedUser, ApiError> {
        let user = self.current_user_or_401()?;

        if !user.role.is_staff() {
            return Err(ApiError::forbidden("Staff access required"));
        }

        Ok(user)
    }
}
