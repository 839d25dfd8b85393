//! Status values produced by probes and the aggregate built from them.

use std::collections::BTreeMap;
use std::fmt;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Outcome of probing a single dependency.
///
/// Serialized as plain text: `"healthy"`, `"unhealthy: <reason>"` or
/// `"not configured"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyStatus {
    Healthy,
    Unhealthy(String),
    NotConfigured,
}

impl DependencyStatus {
    pub fn unhealthy(reason: impl Into<String>) -> Self {
        DependencyStatus::Unhealthy(reason.into())
    }

    pub fn is_unhealthy(&self) -> bool {
        matches!(self, DependencyStatus::Unhealthy(_))
    }
}

impl fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyStatus::Healthy => write!(f, "healthy"),
            DependencyStatus::Unhealthy(reason) => write!(f, "unhealthy: {}", reason),
            DependencyStatus::NotConfigured => write!(f, "not configured"),
        }
    }
}

impl Serialize for DependencyStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Overall service status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Degraded,
}

impl OverallStatus {
    /// Transport status for this outcome. Degraded is the only non-200 answer.
    pub fn status_code(self) -> StatusCode {
        match self {
            OverallStatus::Healthy => StatusCode::OK,
            OverallStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverallStatus::Healthy => write!(f, "healthy"),
            OverallStatus::Degraded => write!(f, "degraded"),
        }
    }
}

/// Result of one health check request, serialized as the /health body.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateHealth {
    pub status: OverallStatus,
    pub timestamp: DateTime<Utc>,
    pub services: BTreeMap<String, DependencyStatus>,
}

impl AggregateHealth {
    /// Build the aggregate from named probe outcomes.
    ///
    /// Any `Unhealthy` entry degrades the service; `NotConfigured` does not.
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = (String, DependencyStatus)>,
    {
        let services: BTreeMap<String, DependencyStatus> = outcomes.into_iter().collect();
        let status = if services.values().any(DependencyStatus::is_unhealthy) {
            OverallStatus::Degraded
        } else {
            OverallStatus::Healthy
        };

        Self {
            status,
            timestamp: Utc::now(),
            services,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status.status_code()
    }
}
