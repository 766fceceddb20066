//! App Router

use salvo::Router;

use crate::{auth, carts, loyalty, notifications, orders, products, returns, reviews};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .get(products::handlers::index::handler)
                .push(
                    Router::with_path("{uuid}")
                        .get(products::handlers::get::handler)
                        .push(
                            Router::with_path("reviews")
                                .get(products::handlers::reviews::handler),
                        ),
                ),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("cart")
                        .get(carts::handlers::get::handler)
                        .delete(carts::handlers::clear::handler)
                        .push(
                            Router::with_path("items")
                                .post(carts::handlers::add_item::handler)
                                .push(
                                    Router::with_path("{uuid}")
                                        .put(carts::handlers::update_item::handler)
                                        .delete(carts::handlers::remove_item::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .post(orders::handlers::create::handler)
                        .get(orders::handlers::index::handler)
                        .push(
                            Router::with_path("{uuid}")
                                .get(orders::handlers::get::handler)
                                .push(
                                    Router::with_path("status")
                                        .put(orders::handlers::update_status::handler),
                                )
                                .push(
                                    Router::with_path("payment")
                                        .post(orders::handlers::payment::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("returns")
                        .post(returns::handlers::create::handler)
                        .get(returns::handlers::index::handler)
                        .push(
                            Router::with_path("{uuid}")
                                .get(returns::handlers::get::handler)
                                .push(
                                    Router::with_path("process")
                                        .put(returns::handlers::process::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("admin/returns")
                        .get(returns::handlers::admin_index::handler),
                )
                .push(
                    Router::with_path("reviews")
                        .post(reviews::handlers::create::handler)
                        .push(
                            Router::with_path("{uuid}/reply")
                                .put(reviews::handlers::reply::handler),
                        ),
                )
                .push(
                    Router::with_path("notifications")
                        .get(notifications::handlers::index::handler)
                        .push(
                            Router::with_path("{uuid}/read")
                                .put(notifications::handlers::mark_read::handler),
                        ),
                )
                .push(Router::with_path("loyalty").get(loyalty::handlers::summary::handler)),
        )
}
