//! Visitor webapp: a small HTTP service that counts page views in a cache,
//! shows database status on its landing page, and exposes /health and /info
//! for container orchestration.

pub mod config;
pub mod deps;
pub mod error;
pub mod health;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod templates;
pub mod visitors;

pub use error::{AppError, DependencyError};
