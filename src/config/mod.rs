//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BAZI_CHART` prefix and nested values use double underscores as separators.
//! A bare `PORT` variable overrides the server port.
//!
//! # Example
//!
//! ```no_run
//! use bazi_chart::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.bind_address());
//! ```

mod error;
mod server;
mod tool;

pub use error::{ConfigError, ConfigValidationError};
pub use server::{Environment, ServerConfig};
pub use tool::ToolConfig;

use serde::Deserialize;

/// Variable that overrides `server.port` when set.
const PORT_VAR: &str = "PORT";

/// Root application configuration
///
/// Every value has a default, so an empty environment yields a runnable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, static files)
    #[serde(default)]
    pub server: ServerConfig,

    /// External chart tool configuration
    #[serde(default)]
    pub tool: ToolConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BAZI_CHART` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Applies `PORT` on top, if set
    ///
    /// # Environment Variable Format
    ///
    /// - `BAZI_CHART__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `BAZI_CHART__TOOL__ENABLED=false` -> `tool.enabled = false`
    /// - `PORT=8080` -> `server.port = 8080`
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
                    .prefix("BAZI_CHART")
                    .separator("__"),
            )
            .set_override_option("server.port", std::env::var(PORT_VAR).ok())?
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.server.validate()?;
        self.tool.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
