//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use dailybrew_app::{
    auth::{AuthenticatedUser, MockAuthService},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        loyalty::MockLoyaltyService,
        notifications::MockNotificationsService,
        orders::MockOrdersService,
        products::MockProductsService,
        returns::MockReturnsService,
        reviews::MockReviewsService,
        users::models::{Role, UserUuid},
    },
};

use crate::{extensions::DepotExt, state::State};

pub(crate) const TEST_USER_UUID: Uuid = Uuid::nil();

#[must_use]
pub(crate) fn customer() -> AuthenticatedUser {
    AuthenticatedUser {
        uuid: UserUuid::from_uuid(TEST_USER_UUID),
        role: Role::Customer,
    }
}

#[must_use]
pub(crate) fn staff() -> AuthenticatedUser {
    AuthenticatedUser {
        uuid: UserUuid::from_uuid(TEST_USER_UUID),
        role: Role::Staff,
    }
}

/// One mock per service; unset services reject every call by default.
#[derive(Default)]
pub(crate) struct Mocks {
    pub auth: MockAuthService,
    pub products: MockProductsService,
    pub carts: MockCartsService,
    pub orders: MockOrdersService,
    pub loyalty: MockLoyaltyService,
    pub returns: MockReturnsService,
    pub reviews: MockReviewsService,
    pub notifications: MockNotificationsService,
}

pub(crate) fn state_with(mocks: Mocks) -> Arc<State> {
    Arc::new(State::new(AppContext {
        auth: Arc::new(mocks.auth),
        products: Arc::new(mocks.products),
        carts: Arc::new(mocks.carts),
        orders: Arc::new(mocks.orders),
        loyalty: Arc::new(mocks.loyalty),
        returns: Arc::new(mocks.returns),
        reviews: Arc::new(mocks.reviews),
        notifications: Arc::new(mocks.notifications),
    }))
}

#[salvo::handler]
async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(customer());
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
async fn inject_staff(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(staff());
    ctrl.call_next(req, depot, res).await;
}

/// A service with the given route mounted behind an authenticated
/// customer account.
pub(crate) fn service_as_customer(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(mocks)))
            .hoop(inject_customer)
            .push(route),
    )
}

/// A service with the given route mounted behind a staff account.
pub(crate) fn service_as_staff(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(mocks)))
            .hoop(inject_staff)
            .push(route),
    )
}

/// A service with the given route mounted without any authentication.
pub(crate) fn service_public(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state_with(mocks))).push(route))
}
