//! Rugs JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use rugs_app::context::{AppContext, AppOptions};

use crate::{
    config::ServerConfig,
    observability::{Observability, metrics_handler, request_logging},
    state::State,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod accounts;
mod auth;
mod cart;
mod config;
mod errors;
mod extensions;
mod healthcheck;
mod items;
mod observability;
mod orders;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Rugs JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = match Observability::init(&config) {
        Ok(observability) => observability,
        Err(init_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "the subscriber failed to install, so there is no logger"
            )]
            {
                eprintln!("Observability error: {init_error}");
            }

            process::exit(1);
        }
    };

    let notifier = match config.notifications.sender() {
        Ok(notifier) => notifier,
        Err(config_error) => {
            error!("invalid notification settings: {config_error}");

            process::exit(1);
        }
    };

    let options = AppOptions {
        migrate: config.database.migrate,
        token_ttl: config.auth.token_ttl(),
        notifier,
        site_url: config.notifications.site_url.clone(),
    };

    let app = match AppContext::from_database_url(&config.database.database_url, options).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(request_logging)
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(router::app_router());

    let doc = OpenApi::new("Rugs API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router.push(doc.into_router("/api-doc/openapi.json"));

    let server = Server::new(listener);
    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    observability.shutdown();
}
