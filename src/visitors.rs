//! Page view counter stored in the cache.

use std::sync::Arc;

use tracing::warn;

use crate::deps::Cache;
use crate::error::DependencyError;

/// Counter shown on the landing page.
///
/// The value lives entirely in the cache; this type only knows the key. When
/// the cache is missing or failing the page shows `0` rather than a stale
/// number.
#[derive(Clone)]
pub struct VisitorCounter {
    cache: Option<Arc<dyn Cache>>,
    key: String,
}

impl VisitorCounter {
    pub fn new(cache: Option<Arc<dyn Cache>>, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
        }
    }

    /// Increment and return the new count, or the error that prevented it.
    pub async fn try_increment(&self) -> Result<i64, DependencyError> {
        let cache = self.cache.as_ref().ok_or(DependencyError::NotConfigured)?;
        cache.incr(&self.key).await
    }

    /// Increment and return the new count, reporting `0` on any failure.
    ///
    /// Every successful call adds exactly one.
    pub async fn increment_and_read(&self) -> i64 {
        match self.try_increment().await {
            Ok(count) => count,
            Err(DependencyError::NotConfigured) => 0,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Redis error while counting visitor");
                0
            }
        }
    }
}
