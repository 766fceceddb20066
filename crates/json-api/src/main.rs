//! dailybrew JSON API Server

use std::{process, sync::Arc, time::Duration};

use salvo::{affix_state::inject, catch_panic::CatchPanic, prelude::*, trailing_slash::remove_slash};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dailybrew_app::{
    context::AppContext,
    database::{self, Db},
    mailer::{DisabledMailer, HttpMailer, HttpMailerConfig, Mailer},
    outbox::OutboxDispatcher,
};

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod carts;
mod config;
mod extensions;
mod healthcheck;
mod loyalty;
mod notifications;
mod orders;
mod products;
mod response;
mod returns;
mod reviews;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// dailybrew JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");

        process::exit(1);
    });

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level)),
        )
        .init();

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let pool = match database::connect(&config.database.database_url).await {
        Ok(pool) => pool,
        Err(connect_error) => {
            error!("failed to connect to database: {connect_error}");

            process::exit(1);
        }
    };

    let app = AppContext::new(pool.clone(), config.orders.transition_policy);

    // Dispatch outbox events committed by the workflows
    let mailer: Arc<dyn Mailer> = match &config.mailer.mailer_endpoint {
        Some(endpoint) => Arc::new(HttpMailer::new(HttpMailerConfig {
            endpoint: endpoint.clone(),
            from: config.mailer.mailer_from.clone(),
        })),
        None => Arc::new(DisabledMailer),
    };

    let dispatcher = OutboxDispatcher::new(
        Db::new(pool),
        mailer,
        Duration::from_secs(config.mailer.outbox_poll_seconds),
    );

    tokio::spawn(dispatcher.run());

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(router::app_router());

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(shutdown_error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {shutdown_error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
