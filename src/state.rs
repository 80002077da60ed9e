//! Shared application state for request handlers.

use std::sync::Arc;

use crate::check::Check;
use crate::config::AppConfig;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the loaded configuration and the one [`Check`] that every component
/// reports into and the health endpoint reads from.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub check: Arc<Check>,
}

impl AppState {
    /// Creates a new application state from the given configuration and check.
    pub fn new(config: AppConfig, check: Arc<Check>) -> Self {
        Self {
            config: Arc::new(config),
            check,
        }
    }
}
