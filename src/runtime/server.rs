//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_web::{App, HttpServer, web};
use anyhow::Result;
use tracing::{info, warn};

use crate::api::configure_routes;
use crate::api::middleware::TimingMiddleware;
use crate::config::StaticConfig;
use crate::errors::GeolocatorError;
use crate::runtime::lifetime;
use crate::services::LookupService;

/// Run the HTTP server
///
/// This function:
/// 1. Opens the GeoIP database and builds the lookup service
/// 2. Binds `server.ip:server.port`
/// 3. Serves `/ping` and `/check/{address}` until Ctrl+C
///
/// Database and bind failures are returned as [`GeolocatorError`] inside the
/// `anyhow::Error`.
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(config).map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;

    serve(config, startup.lookup.clone()).await?;

    drop(startup);
    info!("Server stopped, GeoIP database closed");
    Ok(())
}

/// Bind `server.ip:server.port` and serve with an already built lookup service
///
/// Returns once the server has stopped. A failed bind is returned as
/// [`GeolocatorError::Bind`].
pub async fn serve(config: &StaticConfig, lookup: web::Data<LookupService>) -> Result<()> {
    let server_config = config.server.clone();
    let bind_address = config.bind_address();

    let workers = config.server.workers.max(1);
    info!("Using {} worker threads", workers);

    let server = HttpServer::new(move || {
        let lookup = lookup.clone();
        let server_config = server_config.clone();

        App::new()
            .wrap(TimingMiddleware)
            .configure(move |cfg| configure_routes(cfg, lookup, &server_config))
    })
    .workers(workers)
    .disable_signals()
    .bind(&bind_address)
    .map_err(|e| GeolocatorError::bind(format!("Cannot listen on {}: {}", bind_address, e)))?
    .run();

    warn!("Starting server at http://{}", bind_address);

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        lifetime::shutdown::listen_for_shutdown().await;
        handle.stop(true).await;
    });

    server.await?;
    Ok(())
}
