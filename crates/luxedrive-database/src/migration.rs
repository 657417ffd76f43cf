//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use luxedrive_core::error::{AppError, ErrorKind};

/// Apply the SQL migrations under `migrations/` that have not run yet.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Applying pending database migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database schema is up to date");
    Ok(())
}
