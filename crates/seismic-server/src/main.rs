//! Catalog server binary for the seismic catalog.
//!
//! Wires the dedup engine to its `PostgreSQL` store and the HTTP
//! boundary. Loads configuration, connects and migrates the database,
//! and serves the ingest/query API until terminated.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `seismic-config.yaml`
//! 3. Connect to `PostgreSQL` and run migrations
//! 4. Build the catalog service over the earthquake store
//! 5. Serve the HTTP API

mod config;

use std::path::Path;

use seismic_api::{AppState, ServerConfig, start_server};
use seismic_db::{EarthquakeStore, PostgresConfig, PostgresPool};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Default configuration file path, relative to the working directory.
const CONFIG_PATH: &str = "seismic-config.yaml";

/// Application entry point for the catalog server.
///
/// # Errors
///
/// Returns an error if configuration loading, database setup, or the
/// server itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("seismic-server starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        time_window_minutes = config.dedup.time_window_minutes,
        distance_threshold_km = config.dedup.distance_threshold_km,
        "Configuration loaded"
    );

    // 3. Connect to PostgreSQL and run migrations.
    let pg_config = PostgresConfig::new(&config.database.url)
        .with_max_connections(config.database.max_connections);
    let pool = PostgresPool::connect(&pg_config).await?;
    pool.run_migrations().await?;

    // 4. Build the catalog service over the earthquake store.
    let store = EarthquakeStore::new(&pool);
    let state = AppState::new(store, config.dedup.clone());

    // 5. Serve the HTTP API.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let result = start_server(&server_config, state).await;

    pool.close().await;
    result?;

    info!("seismic-server stopped");
    Ok(())
}

/// Load configuration from the default path, falling back to built-in
/// defaults when no file is present.
fn load_config() -> Result<AppConfig, config::ConfigError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        AppConfig::from_file(path)
    } else {
        info!(path = CONFIG_PATH, "No config file found, using defaults");
        Ok(AppConfig::default())
    }
}
