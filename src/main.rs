//! allclear: a health check endpoint for a process's components.
//!
//! This is the application entry point. It loads configuration from a TOML
//! file, initializes tracing, creates the shared health check, sets up the
//! Axum router and starts the HTTP server.

use clap::Parser;

use allclear::app;
use allclear::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};

/// allclear: report health as the logical AND of named components
#[derive(Parser, Debug)]
#[command(name = "allclear", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "allclear=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration first, it decides the log format
    let config = AppConfig::load(&args.config)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    app::init_tracing(&log_filter, &config.logging)?;

    tracing::info!(
        config = %args.config,
        host = %config.http.host,
        port = config.http.port,
        path = %config.health.path,
        "Loaded configuration"
    );

    app::run(config).await?;

    Ok(())
}
