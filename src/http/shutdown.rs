//! Graceful shutdown and signal handling.
//!
//! On SIGTERM/SIGINT the check is first marked failing so load balancers stop
//! routing here, then connections are drained.

use std::sync::Arc;
use std::time::Duration;

use axum_server::Handle;

use crate::check::Check;
use crate::config::{GRACEFUL_SHUTDOWN_SECS, SHUTDOWN_COMPONENT};

/// Setup graceful shutdown on SIGTERM and SIGINT.
///
/// When either signal is received the server is drained with
/// [`drain_and_shutdown`].
pub fn setup_shutdown_handler(handle: Handle, check: Arc<Check>, drain: Duration) {
    tokio::spawn(async move {
        wait_for_signal().await;
        drain_and_shutdown(&check, &handle, drain).await;
    });
}

/// Reports unhealthy, waits out `drain`, then shuts the server down.
///
/// 1. The `shutdown` component is marked failing, so probes get 503
/// 2. The server keeps serving for `drain` so probes can notice
/// 3. New connections stop and existing ones get up to 30 seconds to complete
pub async fn drain_and_shutdown(check: &Check, handle: &Handle, drain: Duration) {
    check.mark_failing(&[SHUTDOWN_COMPONENT]);
    tracing::info!(
        drain_secs = drain.as_secs(),
        "Reporting unhealthy before shutdown"
    );
    tokio::time::sleep(drain).await;

    handle.graceful_shutdown(Some(Duration::from_secs(GRACEFUL_SHUTDOWN_SECS)));
    tracing::info!(
        timeout_secs = GRACEFUL_SHUTDOWN_SECS,
        "Graceful shutdown initiated, waiting for connections to close"
    );
}

async fn wait_for_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
