//! Visitor webapp entry point.
//!
//! Loads configuration (TOML file plus environment overrides), initializes
//! tracing, connects the cache once, prepares the database target, and starts
//! the HTTP server. A missing cache or database never stops startup.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use visitor_webapp::config::{sanitize_url, AppConfig, LoggingConfig, DEFAULT_CONFIG_PATH};
use visitor_webapp::deps::{Database, PostgresDatabase, RedisCache};
use visitor_webapp::http::start_server;
use visitor_webapp::routes::create_router;
use visitor_webapp::state::AppState;
use visitor_webapp::templates::init_templates;

/// Visitor webapp: visitor counter, database status page and health probes
#[derive(Parser, Debug)]
#[command(name = "visitor-webapp", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "visitor_webapp=debug,sqlx=warn")
    #[arg(short, long)]
    log_level: Option<String>,
}

fn init_tracing(log_filter: &str, logging: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(log_filter));

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Configuration decides the log format, so it is loaded before tracing
    let config = AppConfig::load(&args.config)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| config.default_log_filter().to_string());
    init_tracing(&log_filter, &config.logging);

    tracing::info!(
        environment = %config.app.environment,
        hostname = %config.app.hostname,
        "Starting visitor webapp"
    );
    tracing::info!(url = %sanitize_url(&config.database.url), "Database target");
    tracing::info!(
        url = %sanitize_url(&config.redis.url),
        enabled = config.redis.enabled,
        "Redis target"
    );

    let tera = init_templates()?;
    tracing::info!("Initialized templates");

    // The cache gets exactly one connection attempt
    let cache = RedisCache::connect_optional(&config.redis).await;
    let database: Arc<dyn Database> = Arc::new(PostgresDatabase::new(config.database.url.clone()));

    let http_config = config.http.clone();
    let state = AppState::new(config, tera, cache, database);
    let app = create_router(state);

    start_server(app, &http_config).await?;

    Ok(())
}
