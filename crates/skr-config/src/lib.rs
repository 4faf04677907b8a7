//! # skr-config
//!
//! Layered configuration loading for skrump using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SKRUMP_*` prefix, `__` as separator)
//! 2. Project-level `.skrump/config.toml`
//! 3. User-level `~/.config/skrump/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SKRUMP_DATABASE__PATH` -> `database.path`,
//! `SKRUMP_PROVIDER__AVATAR_BASE_URL` -> `provider.avatar_base_url`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use skr_config::SkrConfig;
//!
//! let config = SkrConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod database;
mod error;
mod provider;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use provider::ProviderConfig;
pub use skr_core::smartsheet::AVATAR_BASE_URL as SMARTSHEET_AVATAR_BASE_URL;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SkrConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl SkrConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment (used by tests and by
    /// callers that layer extra providers).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.provider.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".skrump/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("SKRUMP_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("skrump").join("config.toml"))
    }

    /// Load `.env` from the current directory. Silently does nothing if absent.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}
