//! Health endpoints for load balancers and orchestration probes.
//!
//! The probe endpoint answers GET and HEAD from a single read of the shared
//! [`Check`]. GET carries the status text as body; HEAD carries only the
//! status code, with 204 standing in for a healthy 200. Every other method is
//! rejected with 405.
//!
//! The listing endpoint enumerates the failing component names as JSON.

use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};
use http::{
    header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS},
    Method, StatusCode,
};
use serde::Serialize;

use crate::check::Check;
use crate::context::Carried;
use crate::state::AppState;

/// Probe handler, routed for every method.
pub async fn serve(State(state): State<AppState>, method: Method) -> Response {
    respond(&method, &state.check)
}

/// Maps the request method and the current health of `check` to a response.
///
/// | Method | Healthy | Unhealthy |
/// |--------|---------|-----------|
/// | GET    | 200 `OK\n` | 503 `Service Unavailable\n` |
/// | HEAD   | 204, no body | 503, no body |
/// | other  | 405 `Method Not Allowed\n` | 405 `Method Not Allowed\n` |
pub fn respond(method: &Method, check: &Check) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return respond_with(StatusCode::METHOD_NOT_ALLOWED);
    }

    let healthy = check.is_healthy();

    if method == Method::HEAD {
        return if healthy {
            StatusCode::NO_CONTENT.into_response()
        } else {
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        };
    }

    if healthy {
        respond_with(StatusCode::OK)
    } else {
        respond_with(StatusCode::SERVICE_UNAVAILABLE)
    }
}

/// Body of the failing component listing
#[derive(Debug, Serialize)]
pub struct FailingReport {
    pub healthy: bool,
    /// Failing component names, sorted
    pub failing: Vec<String>,
}

/// Listing handler. Reads the check carried by the request.
pub async fn failing(method: Method, Carried(check): Carried) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return respond_with(StatusCode::METHOD_NOT_ALLOWED);
    }

    let mut failing = check.list_failing(Vec::new());
    failing.sort_unstable();

    Json(FailingReport {
        healthy: failing.is_empty(),
        failing,
    })
    .into_response()
}

/// Plain-text response whose body is the status' reason phrase.
fn respond_with(status: StatusCode) -> Response {
    let body = format!("{}\n", status.canonical_reason().unwrap_or_default());
    (
        status,
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8"),
            (X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        body,
    )
        .into_response()
}
