//! Clients for the two external dependencies: a key-value cache and a
//! relational database.
//!
//! Both sit behind traits so handlers, probes and tests only ever see
//! `Arc<dyn Cache>` / `Arc<dyn Database>`.

pub mod cache;
pub mod database;

pub use cache::{Cache, RedisCache};
pub use database::{Database, DatabaseConnection, PostgresDatabase, ServerInfo};
