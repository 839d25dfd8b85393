//! Relational database client.
//!
//! There is no pool: every caller opens a connection, runs its queries and
//! closes it again. [`with_connection`] is the only way the rest of the crate
//! talks to the database, so the close happens on every exit path.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::Serialize;
use sqlx::{Connection, PgConnection};
use tracing::debug;

use crate::error::DependencyError;

/// A configured database target that can hand out fresh connections.
#[async_trait]
pub trait Database: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn DatabaseConnection>, DependencyError>;
}

/// One open connection.
#[async_trait]
pub trait DatabaseConnection: Send {
    /// `SELECT 1`
    async fn ping(&mut self) -> Result<(), DependencyError>;

    /// `SELECT version()` and `SELECT NOW()`
    async fn server_info(&mut self) -> Result<ServerInfo, DependencyError>;

    async fn close(self: Box<Self>) -> Result<(), DependencyError>;
}

/// What the landing page shows about the database server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerInfo {
    pub version: String,
    pub time: DateTime<Utc>,
}

/// Open a connection, run `op` on it, and close it regardless of the outcome.
///
/// A failed open comes back as [`DependencyError::Connection`]; errors from
/// `op` are returned unchanged. A failed close is only logged.
pub async fn with_connection<T, F>(database: &dyn Database, op: F) -> Result<T, DependencyError>
where
    F: for<'c> FnOnce(&'c mut dyn DatabaseConnection) -> BoxFuture<'c, Result<T, DependencyError>>,
{
    let mut conn = database.connect().await?;
    let result = op(conn.as_mut()).await;
    if let Err(e) = conn.close().await {
        debug!(error = %e, "Error while closing database connection");
    }
    result
}

/// PostgreSQL target identified by a connection string.
pub struct PostgresDatabase {
    url: String,
}

impl PostgresDatabase {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl Database for PostgresDatabase {
    async fn connect(&self) -> Result<Box<dyn DatabaseConnection>, DependencyError> {
        let conn = PgConnection::connect(&self.url)
            .await
            .map_err(|e| DependencyError::Connection(e.to_string()))?;
        Ok(Box::new(PostgresConnection { conn }))
    }
}

struct PostgresConnection {
    conn: PgConnection,
}

fn query_error(err: sqlx::Error) -> DependencyError {
    DependencyError::Query(err.to_string())
}

#[async_trait]
impl DatabaseConnection for PostgresConnection {
    async fn ping(&mut self) -> Result<(), DependencyError> {
        sqlx::query("SELECT 1")
            .execute(&mut self.conn)
            .await
            .map(|_| ())
            .map_err(query_error)
    }

    async fn server_info(&mut self) -> Result<ServerInfo, DependencyError> {
        let (version,): (String,) = sqlx::query_as("SELECT version()")
            .fetch_one(&mut self.conn)
            .await
            .map_err(query_error)?;
        let (time,): (DateTime<Utc>,) = sqlx::query_as("SELECT NOW()")
            .fetch_one(&mut self.conn)
            .await
            .map_err(query_error)?;
        Ok(ServerInfo { version, time })
    }

    async fn close(self: Box<Self>) -> Result<(), DependencyError> {
        self.conn
            .close()
            .await
            .map_err(|e| DependencyError::Connection(e.to_string()))
    }
}
