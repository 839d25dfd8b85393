//! Dependency health model.
//!
//! Probes check one dependency each and report a [`DependencyStatus`]; the
//! [`HealthAggregator`] runs them all and derives the overall status and the
//! HTTP status code for /health.

pub mod aggregator;
pub mod probe;
pub mod status;

pub use aggregator::HealthAggregator;
pub use probe::{CacheProbe, DatabaseProbe, DependencyProbe};
pub use status::{AggregateHealth, DependencyStatus, OverallStatus};
