//! # pe-config
//!
//! Layered configuration loading for pereview using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PEREVIEW_*` prefix, `__` as separator)
//! 2. Project-level `./pereview.toml`
//! 3. User-level `~/.config/pereview/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PEREVIEW_DATA__CSV_FILE` -> `data.csv_file`,
//! `PEREVIEW_REVIEW__LOCK_TIMEOUT_SECS` -> `review.lock_timeout_secs`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use pe_config::PeConfig;
//!
//! let config = PeConfig::load_with_dotenv().expect("config");
//! let dataset = config.data.dataset_path(None).expect("dataset path");
//! println!("reviewing {}", dataset.display());
//! ```

mod data;
mod display;
mod error;
mod review;

pub use data::DataConfig;
pub use display::{DEFAULT_KEYWORDS, DisplayConfig};
pub use error::ConfigError;
pub use review::ReviewSettings;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the project-level config file, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "pereview.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PeConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub review: ReviewSettings,
}

impl PeConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`PeConfig::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the working directory.
    ///
    /// # Errors
    ///
    /// See [`PeConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PEREVIEW_").split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pereview").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_loads() {
        let config = PeConfig::default();
        assert!(!config.data.is_configured());
        assert!(config.display.reflow);
        assert!(config.display.highlight);
        assert_eq!(config.display.keywords.len(), DEFAULT_KEYWORDS.len());
        assert!(config.review.auto_advance);
        assert_eq!(config.review.lock_timeout_secs, 5);
    }

    #[test]
    fn defaults_survive_serialized_provider() {
        figment::Jail::expect_with(|_jail| {
            let config: PeConfig = Figment::from(Serialized::defaults(PeConfig::default()))
                .extract()?;
            assert!(config.data.csv_file.is_none());
            assert_eq!(config.review.lock_timeout().as_secs(), 5);
            Ok(())
        });
    }
}
