//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. Values come from an optional TOML file and from
//! environment variables with the `SAMMELBESTELLUNG` prefix; nested values use
//! double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use sammelbestellung::config::AppConfig;
//!
//! let config = AppConfig::load(None).expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Command prefix: {}", config.bot.command_prefix);
//! ```

mod bot;
mod error;
mod ledger;
mod logging;
mod storage;

pub use bot::BotConfig;
pub use error::{ConfigError, ValidationError};
pub use ledger::LedgerConfig;
pub use logging::LoggingConfig;
pub use storage::StorageConfig;

use serde::Deserialize;
use std::path::Path;

/// Config file read when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sammelbestellung.toml";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Command prefix and console identities
    #[serde(default)]
    pub bot: BotConfig,

    /// Document store roots
    #[serde(default)]
    pub storage: StorageConfig,

    /// Tally ledger connection and settlement policy
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads the TOML file at `path` (default `sammelbestellung.toml`) if it exists
    /// 3. Reads environment variables with `SAMMELBESTELLUNG` prefix, which win
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SAMMELBESTELLUNG__BOT__COMMAND_PREFIX=#` -> `bot.command_prefix = "#"`
    /// - `SAMMELBESTELLUNG__LEDGER__BASE_URL=...` -> `ledger.base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is malformed or values cannot be
    /// parsed into the expected types.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let config = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::default()
                    .prefix("SAMMELBESTELLUNG")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.bot.validate()?;
        self.storage.validate()?;
        self.ledger.validate()?;
        Ok(())
    }
}
