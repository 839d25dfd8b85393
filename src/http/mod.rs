//! HTTP server module.
//!
//! Serves plain HTTP; TLS is terminated by whatever sits in front of the
//! container. The server includes graceful shutdown on SIGTERM/SIGINT so
//! in-flight requests finish before the orchestrator kills the process.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
