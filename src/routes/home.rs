//! Landing page: visitor count and database status.
//!
//! The page always renders. Dependency outages only change what is shown:
//! a `0` count and a disconnected database line.

use axum::{extract::State, response::Html};
use chrono::Utc;
use tracing::{instrument, warn};

use crate::deps::database::with_connection;
use crate::deps::{Database, ServerInfo};
use crate::error::AppError;
use crate::state::AppState;

pub const DB_STATUS_CONNECTED: &str = "✅ Connected";
pub const DB_STATUS_DISCONNECTED: &str = "❌ Disconnected";

/// Fetch server version and time over a short-lived connection.
async fn fetch_database_info(database: &dyn Database) -> Option<ServerInfo> {
    match with_connection(database, |conn| conn.server_info()).await {
        Ok(info) => Some(info),
        Err(e) => {
            warn!(error = %e, "Database unavailable while rendering landing page");
            None
        }
    }
}

/// Landing page handler.
#[instrument(name = "home::index", skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let visitor_count = state.visitors.increment_and_read().await;
    let db_info = fetch_database_info(state.database.as_ref()).await;

    let db_status = if db_info.is_some() {
        DB_STATUS_CONNECTED
    } else {
        DB_STATUS_DISCONNECTED
    };

    let mut context = tera::Context::new();
    context.insert("config", &state.config.app);
    context.insert("visitor_count", &visitor_count);
    context.insert("db_status", db_status);
    context.insert("db_connected", &db_info.is_some());
    context.insert("db_info", &db_info);
    context.insert("current_time", &Utc::now());

    let html = state.tera.render("index.html", &context)?;
    Ok(Html(html))
}
