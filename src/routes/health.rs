//! Health check endpoint for container orchestration.
//!
//! Probes the cache and the database on every call. Returns 200 when nothing
//! is unhealthy and 503 otherwise, so it can back a readiness probe directly.

use axum::{extract::State, http::StatusCode, Json};
use tracing::{instrument, warn};

use crate::health::{AggregateHealth, OverallStatus};
use crate::state::AppState;

/// Health check handler.
#[instrument(name = "health::check", skip(state))]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<AggregateHealth>) {
    let health = state.health.aggregate().await;

    if health.status == OverallStatus::Degraded {
        warn!(services = ?health.services, "Service degraded");
    }

    (health.status_code(), Json(health))
}
