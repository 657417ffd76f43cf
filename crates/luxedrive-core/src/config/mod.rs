//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate and overlaid with `LUXEDRIVE__*` environment variables.

pub mod app;
pub mod auth;
pub mod booking;
pub mod database;
pub mod logging;
pub mod notifications;
pub mod worker;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::booking::BookingConfig;
use self::database::DatabaseConfig;
use self::logging::LoggingConfig;
use self::notifications::NotificationsConfig;
use self::worker::WorkerConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (default.toml + environment overlay + environment variables).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Background delivery pool settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Admin contacts and outbound transports for booking notifications.
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// Booking creation settings.
    #[serde(default)]
    pub booking: BookingConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `LUXEDRIVE__`, using `__` as
    /// the nesting separator (`LUXEDRIVE__DATABASE__URL`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("LUXEDRIVE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
