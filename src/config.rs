//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines constants for
//! default endpoints, reserved component names, shutdown timing, logging and
//! default paths. `AppConfig` is the root configuration struct.

use serde::Deserialize;
use std::path::Path;

// =============================================================================
// HTTP Endpoints
// =============================================================================

/// Default path of the health probe endpoint
pub const DEFAULT_HEALTH_PATH: &str = "/health";

/// Default path of the failing component listing
pub const DEFAULT_FAILING_PATH: &str = "/health/failing";

/// Cache-Control for health responses. Probes must never see a cached answer.
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

// =============================================================================
// Reserved Components
// =============================================================================

/// Failing from process start until the listener is bound
pub const STARTUP_COMPONENT: &str = "startup";

/// Marked failing once a shutdown signal arrives
pub const SHUTDOWN_COMPONENT: &str = "shutdown";

// =============================================================================
// Shutdown Timing
// =============================================================================

/// Default seconds to keep serving 503 before closing connections
pub const DEFAULT_DRAIN_SECS: u64 = 5;

/// Maximum seconds to wait for open connections during graceful shutdown
pub const GRACEFUL_SHUTDOWN_SECS: u64 = 30;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "allclear=info,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Health endpoint settings
    #[serde(default)]
    pub health: HealthConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

/// Health endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HealthConfig {
    /// Path of the probe endpoint (default: /health)
    #[serde(default = "HealthConfig::default_path")]
    pub path: String,
    /// Path of the failing component listing (default: /health/failing)
    #[serde(default = "HealthConfig::default_failing_path")]
    pub failing_path: String,
    /// Components marked failing at startup until something reports them passing
    #[serde(default)]
    pub initial_failing: Vec<String>,
    /// Seconds to report unhealthy after a shutdown signal before draining (default: 5)
    #[serde(default = "HealthConfig::default_drain_seconds")]
    pub drain_seconds: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            failing_path: Self::default_failing_path(),
            initial_failing: Vec::new(),
            drain_seconds: Self::default_drain_seconds(),
        }
    }
}

impl HealthConfig {
    fn default_path() -> String {
        DEFAULT_HEALTH_PATH.to_string()
    }

    fn default_failing_path() -> String {
        DEFAULT_FAILING_PATH.to_string()
    }

    fn default_drain_seconds() -> u64 {
        DEFAULT_DRAIN_SECS
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    /// Whether structured JSON output was requested
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation(
                "http.port must be non-zero".to_string(),
            ));
        }

        for (key, path) in [
            ("health.path", &self.health.path),
            ("health.failing_path", &self.health.failing_path),
        ] {
            validate_route_path(key, path)?;
        }

        if self.health.path == self.health.failing_path {
            return Err(ConfigError::Validation(
                "health.path and health.failing_path must differ".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got '{}'",
                self.logging.format
            )));
        }

        Ok(())
    }
}

/// Rejects paths the router would refuse or treat as a capture.
///
/// Endpoint paths are literal: no `:`/`*` segments (old capture syntax, which
/// axum panics on) and no `{`/`}` (capture groups).
fn validate_route_path(key: &str, path: &str) -> Result<(), ConfigError> {
    if !path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{} must start with '/', got '{}'",
            key, path
        )));
    }

    if path.contains(['{', '}']) {
        return Err(ConfigError::Validation(format!(
            "{} must not contain '{{' or '}}', got '{}'",
            key, path
        )));
    }

    if path
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
    {
        return Err(ConfigError::Validation(format!(
            "{} segments must not start with ':' or '*', got '{}'",
            key, path
        )));
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
