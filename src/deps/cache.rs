//! Key-value cache client.
//!
//! The cache is connected once at startup. If that first attempt fails the
//! application runs without a cache for the rest of its lifetime, see
//! [`RedisCache::connect_optional`].

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{sanitize_url, RedisConfig};
use crate::error::DependencyError;

/// Operations the application needs from a key-value cache.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Round-trip liveness command.
    async fn ping(&self) -> Result<(), DependencyError>;

    /// Atomically increment `key` by one and return the new value.
    async fn incr(&self, key: &str) -> Result<i64, DependencyError>;
}

/// Redis-backed cache.
///
/// Wraps a `ConnectionManager`, which is cheap to clone and re-establishes the
/// underlying connection on its own after the server goes away. Every connect
/// and reconnect is a single attempt, so an unreachable server surfaces as an
/// error on the call that hit it instead of stalling behind backoff.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Open a client for `url` and verify it with a PING.
    pub async fn connect(url: &str) -> Result<Self, DependencyError> {
        let client = Client::open(url)?;
        let config = ConnectionManagerConfig::new().set_number_of_retries(0);
        let conn = client.get_connection_manager_with_config(config).await?;
        let cache = Self { conn };
        cache.ping().await?;
        Ok(cache)
    }

    /// Startup helper: returns `None` when the cache is disabled or unreachable.
    pub async fn connect_optional(config: &RedisConfig) -> Option<Arc<dyn Cache>> {
        if !config.enabled {
            info!("Redis disabled in configuration");
            return None;
        }

        match Self::connect(&config.url).await {
            Ok(cache) => {
                info!(url = %sanitize_url(&config.url), "Redis connection established");
                Some(Arc::new(cache))
            }
            Err(e) => {
                warn!(
                    url = %sanitize_url(&config.url),
                    error = %e,
                    "Redis connection failed, continuing without cache"
                );
                None
            }
        }
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn ping(&self) -> Result<(), DependencyError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        debug!("Redis PING ok");
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64, DependencyError> {
        let mut conn = self.conn.clone();
        let value: i64 = conn.incr(key, 1).await?;
        Ok(value)
    }
}
