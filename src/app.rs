//! Process wiring: logging, the shared check, and the server.

use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::check::Check;
use crate::config::{AppConfig, HealthConfig, LoggingConfig, STARTUP_COMPONENT};
use crate::error::Error;
use crate::http::start_server;
use crate::routes::create_router;
use crate::state::AppState;

/// Initializes the global tracing subscriber.
///
/// `filter` uses `EnvFilter` directive syntax. The output format comes from
/// the logging configuration.
pub fn init_tracing(filter: &str, logging: &LoggingConfig) -> Result<(), Error> {
    let registry = tracing_subscriber::registry().with(EnvFilter::new(filter));

    if logging.is_json() {
        registry.with(fmt::layer().json()).try_init()?;
    } else {
        registry.with(fmt::layer()).try_init()?;
    }

    Ok(())
}

/// Creates the process-wide check.
///
/// The `startup` component and every configured initial component start out
/// failing.
pub fn initial_check(config: &HealthConfig) -> Arc<Check> {
    let check = Check::new();
    check.mark_failing(&[STARTUP_COMPONENT]);
    check.mark_failing(&config.initial_failing);
    Arc::new(check)
}

/// Runs the health service until it is shut down.
pub async fn run(config: AppConfig) -> Result<(), Error> {
    let check = initial_check(&config.health);
    tracing::info!(
        failing = ?check.list_failing(Vec::new()),
        "Initialized health check"
    );

    let state = AppState::new(config.clone(), Arc::clone(&check));
    let app = create_router(state);

    start_server(app, &config, check).await?;
    Ok(())
}
