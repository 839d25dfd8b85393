//! Container and environment information.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{FRAMEWORK_VERSION, RUNTIME_VERSION};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub hostname: String,
    pub environment: String,
    pub runtime_version: &'static str,
    pub framework_version: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

pub async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        hostname: state.config.app.hostname.clone(),
        environment: state.config.app.environment.clone(),
        runtime_version: RUNTIME_VERSION,
        framework_version: FRAMEWORK_VERSION,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}
