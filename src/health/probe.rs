//! Liveness probes for individual dependencies.
//!
//! A probe never fails: every error is folded into the returned
//! [`DependencyStatus`]. Probes do not retry and set no timeouts of their own.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::status::DependencyStatus;
use crate::deps::database::with_connection;
use crate::deps::{Cache, Database};
use crate::error::DependencyError;

/// Name the cache is reported under in /health.
pub const CACHE_PROBE_NAME: &str = "redis";

/// Name the database is reported under in /health.
pub const DATABASE_PROBE_NAME: &str = "database";

/// Reason reported when the database refuses a connection.
pub const NO_CONNECTION: &str = "no connection";

#[async_trait]
pub trait DependencyProbe: Send + Sync {
    /// Key used for this dependency in the aggregate.
    fn name(&self) -> &str;

    async fn probe(&self) -> DependencyStatus;
}

/// PINGs the cache, if one was configured at startup.
pub struct CacheProbe {
    cache: Option<Arc<dyn Cache>>,
}

impl CacheProbe {
    pub fn new(cache: Option<Arc<dyn Cache>>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl DependencyProbe for CacheProbe {
    fn name(&self) -> &str {
        CACHE_PROBE_NAME
    }

    async fn probe(&self) -> DependencyStatus {
        let Some(cache) = &self.cache else {
            return DependencyStatus::NotConfigured;
        };

        match cache.ping().await {
            Ok(()) => DependencyStatus::Healthy,
            Err(e) => {
                warn!(error = %e, "Redis health check failed");
                DependencyStatus::unhealthy(e.to_string())
            }
        }
    }
}

/// Opens a throwaway connection and runs `SELECT 1`.
pub struct DatabaseProbe {
    database: Arc<dyn Database>,
}

impl DatabaseProbe {
    pub fn new(database: Arc<dyn Database>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl DependencyProbe for DatabaseProbe {
    fn name(&self) -> &str {
        DATABASE_PROBE_NAME
    }

    async fn probe(&self) -> DependencyStatus {
        let result = with_connection(self.database.as_ref(), |conn| conn.ping()).await;

        match result {
            Ok(()) => DependencyStatus::Healthy,
            Err(DependencyError::Connection(e)) => {
                warn!(error = %e, "Database connection failed");
                DependencyStatus::unhealthy(NO_CONNECTION)
            }
            Err(e) => {
                warn!(error = %e, "Database health check failed");
                DependencyStatus::unhealthy(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps::{DatabaseConnection, ServerInfo};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct StubCache {
        fail: bool,
    }

    #[async_trait]
    impl Cache for StubCache {
        async fn ping(&self) -> Result<(), DependencyError> {
            if self.fail {
                Err(DependencyError::Connection("Connection refused (os error 111)".to_string()))
            } else {
                Ok(())
            }
        }

        async fn incr(&self, _key: &str) -> Result<i64, DependencyError> {
            Ok(1)
        }
    }

    #[derive(Clone, Copy)]
    enum DbMode {
        Up,
        QueryFails,
        Down,
    }

    struct StubConnection {
        mode: DbMode,
        closed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl DatabaseConnection for StubConnection {
        async fn ping(&mut self) -> Result<(), DependencyError> {
            match self.mode {
                DbMode::QueryFails => Err(DependencyError::Query(
                    "canceling statement due to statement timeout".to_string(),
                )),
                _ => Ok(()),
            }
        }

        async fn server_info(&mut self) -> Result<ServerInfo, DependencyError> {
            unreachable!("probe only pings")
        }

        async fn close(self: Box<Self>) -> Result<(), DependencyError> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    struct StubDatabase {
        mode: DbMode,
        closed: Arc<AtomicBool>,
        connects: AtomicUsize,
    }

    impl StubDatabase {
        fn new(mode: DbMode) -> Self {
            Self {
                mode,
                closed: Arc::new(AtomicBool::new(false)),
                connects: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Database for StubDatabase {
        async fn connect(&self) -> Result<Box<dyn DatabaseConnection>, DependencyError> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            match self.mode {
                DbMode::Down => Err(DependencyError::Connection("could not connect".to_string())),
                mode => Ok(Box::new(StubConnection {
                    mode,
                    closed: self.closed.clone(),
                })),
            }
        }
    }

    #[tokio::test]
    async fn test_cache_probe_not_configured() {
        let probe = CacheProbe::new(None);
        assert_eq!(probe.probe().await, DependencyStatus::NotConfigured);
        assert_eq!(probe.name(), "redis");
    }

    #[tokio::test]
    async fn test_cache_probe_healthy_and_unhealthy() {
        let probe = CacheProbe::new(Some(Arc::new(StubCache { fail: false })));
        assert_eq!(probe.probe().await, DependencyStatus::Healthy);

        let probe = CacheProbe::new(Some(Arc::new(StubCache { fail: true })));
        match probe.probe().await {
            DependencyStatus::Unhealthy(reason) => assert!(reason.contains("Connection refused")),
            other => panic!("expected unhealthy, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_database_probe_healthy_closes_connection() {
        let db = Arc::new(StubDatabase::new(DbMode::Up));
        let probe = DatabaseProbe::new(db.clone());

        assert_eq!(probe.probe().await, DependencyStatus::Healthy);
        assert!(db.closed.load(Ordering::SeqCst));
        assert_eq!(probe.name(), "database");
    }

    #[tokio::test]
    async fn test_database_probe_query_failure_closes_connection() {
        let db = Arc::new(StubDatabase::new(DbMode::QueryFails));
        let probe = DatabaseProbe::new(db.clone());

        assert_eq!(
            probe.probe().await,
            DependencyStatus::unhealthy("canceling statement due to statement timeout")
        );
        assert!(db.closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_database_probe_no_connection() {
        let db = Arc::new(StubDatabase::new(DbMode::Down));
        let probe = DatabaseProbe::new(db.clone());

        assert_eq!(probe.probe().await, DependencyStatus::unhealthy("no connection"));
        assert!(!db.closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_database_probe_connects_every_call() {
        let db = Arc::new(StubDatabase::new(DbMode::Up));
        let probe = DatabaseProbe::new(db.clone());

        probe.probe().await;
        probe.probe().await;

        assert_eq!(db.connects.load(Ordering::SeqCst), 2);
    }
}
