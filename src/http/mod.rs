//! HTTP server module.
//!
//! The server includes:
//! - Startup reporting: the `startup` component passes once the listener is bound
//! - Drain on shutdown: the `shutdown` component fails before connections close
//! - Graceful shutdown on SIGTERM/SIGINT

mod server;
mod shutdown;

pub use server::{serve, start_server, ServerError};
pub use shutdown::drain_and_shutdown;
