//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `VALUES_COMPASS` prefix and nested values use double underscores as separators.
//! Every setting has a default, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use values_compass::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod assessment;
mod auth;
mod error;
mod export;
mod features;
mod server;
mod storage;

pub use assessment::AssessmentConfig;
pub use auth::AuthConfig;
pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use features::FeatureFlags;
pub use server::{Environment, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Wizard requirements and catalog source
    #[serde(default)]
    pub assessment: AssessmentConfig,

    /// Persistence bridge backend
    #[serde(default)]
    pub storage: StorageConfig,

    /// Document conversion
    #[serde(default)]
    pub export: ExportConfig,

    /// Local-flag authentication
    #[serde(default)]
    pub auth: AuthConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `VALUES_COMPASS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `VALUES_COMPASS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `VALUES_COMPASS__ASSESSMENT__MIN_SELECTION=5` -> `assessment.min_selection = 5`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("VALUES_COMPASS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.assessment.validate()?;
        self.storage.validate()?;
        self.export.validate()?;
        self.auth.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
