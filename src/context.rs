//! Carrying the shared [`Check`] through request extensions.
//!
//! The check is attached once per request by [`attach_layer`] and can then be
//! pulled out anywhere the request's `Extensions` are reachable, either with
//! [`retrieve`] or the [`Carried`] extractor. Retrieving from extensions that
//! never had a check attached is a wiring bug and panics.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use http::{request::Parts, Extensions};

use crate::check::Check;
use crate::state::AppState;

/// Private extension key, so nothing outside this module can shadow it.
#[derive(Clone)]
struct CheckKey(Arc<Check>);

/// Returns a copy of `extensions` that carries `check`.
///
/// The input is left untouched and the check itself is shared, not copied.
pub fn attach(extensions: &Extensions, check: &Arc<Check>) -> Extensions {
    let mut extensions = extensions.clone();
    extensions.insert(CheckKey(Arc::clone(check)));
    extensions
}

/// Returns the check previously attached to `extensions`.
///
/// # Panics
///
/// Panics if no check was attached.
pub fn retrieve(extensions: &Extensions) -> Arc<Check> {
    match extensions.get::<CheckKey>() {
        Some(CheckKey(check)) => Arc::clone(check),
        None => panic!("no health check attached to request extensions"),
    }
}

/// Middleware that attaches the application's check to every request.
pub async fn attach_layer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();
    parts.extensions = attach(&parts.extensions, &state.check);
    next.run(Request::from_parts(parts, body)).await
}

/// Extractor for the check carried by the request.
///
/// Panics during extraction if [`attach_layer`] is not installed.
#[derive(Clone, Debug)]
pub struct Carried(pub Arc<Check>);

impl<S> FromRequestParts<S> for Carried
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Carried(retrieve(&parts.extensions)))
    }
}
