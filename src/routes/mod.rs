//! HTTP route handlers.
//!
//! Health routes never get cached. Request tracing is enabled via middleware
//! that generates a unique request ID for each incoming request, allowing
//! correlation of all logs within a request.

pub mod health;

use axum::{middleware, routing::any, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_HEALTH;
use crate::context::attach_layer;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with the health routes.
pub fn create_router(state: AppState) -> Router {
    let health_config = &state.config.health;

    // Both endpoints dispatch on the method themselves
    let health_routes = Router::new()
        .route(&health_config.path, any(health::serve))
        .route(&health_config.failing_path, any(health::failing))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ));

    Router::new()
        .merge(health_routes)
        .with_state(state.clone())
        // Carry the check in request extensions for handlers that extract it
        .layer(middleware::from_fn_with_state(state, attach_layer))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
