use crate::config::ConfigError;
use crate::http::ServerError;

/// Errors that stop the service from starting or running.
///
/// Health reporting itself has no failure modes; these cover the process
/// around it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Server(#[from] ServerError),

    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}
