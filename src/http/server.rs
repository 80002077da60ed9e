//! HTTP server startup logic.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;

use crate::check::Check;
use crate::config::{AppConfig, STARTUP_COMPONENT};

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    Address(String),

    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),
}

/// Start the HTTP server based on configuration.
///
/// Installs the signal handlers that drain and stop the server, then serves
/// until shutdown completes.
pub async fn start_server(
    app: Router,
    config: &AppConfig,
    check: Arc<Check>,
) -> Result<(), ServerError> {
    let handle = Handle::new();

    shutdown::setup_shutdown_handler(
        handle.clone(),
        Arc::clone(&check),
        Duration::from_secs(config.health.drain_seconds),
    );

    serve(app, config, check, handle).await
}

/// Serve `app` until `handle` is shut down.
///
/// `check` is the instance the router reports from. Its `startup` component
/// is marked passing once the listener is bound.
pub async fn serve(
    app: Router,
    config: &AppConfig,
    check: Arc<Check>,
    handle: Handle,
) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port)
        .parse()
        .map_err(|e| ServerError::Address(format!("Invalid http.host or http.port: {}", e)))?;

    spawn_startup_reporter(handle.clone(), check);

    tracing::info!(%addr, health = %config.health.path, "Starting HTTP server");

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Marks the `startup` component passing as soon as the server is listening.
fn spawn_startup_reporter(handle: Handle, check: Arc<Check>) {
    tokio::spawn(async move {
        match handle.listening().await {
            Some(addr) => {
                check.mark_passing(&[STARTUP_COMPONENT]);
                tracing::info!(%addr, "Listening, startup complete");
            }
            None => {
                tracing::debug!("Server stopped before listening");
            }
        }
    });
}
