//! allclear - health as the logical AND of named components
//!
//! Components of a process mark themselves failing or passing on a shared
//! [`Check`]; an HTTP endpoint reports the combined state to load balancers,
//! supervisors and orchestration probes.

pub mod app;
pub mod check;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;

pub use check::Check;
pub use error::Error;
