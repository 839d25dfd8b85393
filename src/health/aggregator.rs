use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, instrument};

use super::probe::{CacheProbe, DatabaseProbe, DependencyProbe};
use super::status::AggregateHealth;
use crate::deps::{Cache, Database};

/// Runs every registered probe and folds the outcomes into one [`AggregateHealth`].
///
/// Holds no state between calls; each [`aggregate`](Self::aggregate) probes afresh.
pub struct HealthAggregator {
    probes: Vec<Box<dyn DependencyProbe>>,
}

impl HealthAggregator {
    pub fn new() -> Self {
        Self { probes: Vec::new() }
    }

    /// The standard probe set: cache and database.
    pub fn for_dependencies(cache: Option<Arc<dyn Cache>>, database: Arc<dyn Database>) -> Self {
        Self::new()
            .with_probe(CacheProbe::new(cache))
            .with_probe(DatabaseProbe::new(database))
    }

    pub fn with_probe(mut self, probe: impl DependencyProbe + 'static) -> Self {
        self.probes.push(Box::new(probe));
        self
    }

    /// Probe all dependencies concurrently.
    #[instrument(name = "health::aggregate", skip(self))]
    pub async fn aggregate(&self) -> AggregateHealth {
        let outcomes = join_all(self.probes.iter().map(|probe| async move {
            let status = probe.probe().await;
            debug!(dependency = probe.name(), %status, "Probe finished");
            (probe.name().to_string(), status)
        }))
        .await;

        AggregateHealth::from_outcomes(outcomes)
    }
}

impl Default for HealthAggregator {
    fn default() -> Self {
        Self::new()
    }
}
