//! Core crate for Roamly: configuration and the shared error taxonomy.

pub mod config;
pub mod error;

pub use config::{CatalogConfig, Config, SearchDefaults, ValidationResult, WeatherArchiveConfig};
pub use error::{AppError, AuthError, CatalogApiError, ConfigError, NetworkError, WeatherApiError};

use anyhow::Result;

/// Initialize logging for the application.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Roamly core initialized");
    Ok(())
}
