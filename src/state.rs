//! Shared application state for request handlers.

use std::sync::Arc;
use tera::Tera;

use crate::config::AppConfig;
use crate::deps::{Cache, Database};
use crate::health::HealthAggregator;
use crate::visitors::VisitorCounter;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// The cache and database handles are injected here once at startup; probes,
/// the aggregator and the visitor counter all hold clones of the same handles.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tera: Arc<Tera>,
    pub database: Arc<dyn Database>,
    pub visitors: VisitorCounter,
    pub health: Arc<HealthAggregator>,
}

impl AppState {
    /// Creates the state from configuration, templates and dependency handles.
    ///
    /// `cache` is `None` when the cache was disabled or unreachable at startup.
    pub fn new(
        config: AppConfig,
        tera: Tera,
        cache: Option<Arc<dyn Cache>>,
        database: Arc<dyn Database>,
    ) -> Self {
        let visitors = VisitorCounter::new(cache.clone(), config.redis.counter_key.clone());
        let health = HealthAggregator::for_dependencies(cache, database.clone());

        Self {
            config: Arc::new(config),
            tera: Arc::new(tera),
            database,
            visitors,
            health: Arc::new(health),
        }
    }
}
