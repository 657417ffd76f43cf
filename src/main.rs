//! LuxeDrive Server
//!
//! Main entry point: loads configuration, connects to PostgreSQL, runs
//! migrations, and hands off to the API server.

use tracing_subscriber::{EnvFilter, fmt};

use luxedrive_core::config::AppConfig;
use luxedrive_core::error::AppError;
use luxedrive_database::DatabasePool;

#[tokio::main]
async fn main() {
    let env = std::env::var("LUXEDRIVE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.is_json() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt().pretty().with_env_filter(filter).with_target(true).init();
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting LuxeDrive v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let db = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    luxedrive_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    luxedrive_api::run_server(config, db).await
}
