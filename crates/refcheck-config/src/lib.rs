//! # refcheck-config
//!
//! Layered configuration loading for refcheck using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`REFCHECK_*` prefix, `__` as separator)
//! 2. Project-level `.refcheck/config.toml`
//! 3. User-level `~/.config/refcheck/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `REFCHECK_CROSSREF__MAILTO` -> `crossref.mailto`,
//! `REFCHECK_HTTP__TIMEOUT_SECS` -> `http.timeout_secs`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use refcheck_config::RefcheckConfig;
//!
//! let config = RefcheckConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//! println!("resolving through {}", config.general.source);
//! ```

mod crossref;
mod error;
mod general;
mod http;
mod pubmed;

pub use crossref::CrossrefConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use http::HttpConfig;
pub use pubmed::PubMedConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RefcheckConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub crossref: CrossrefConfig,
    #[serde(default)]
    pub pubmed: PubMedConfig,
}

impl RefcheckConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be read or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the current directory (if present) before building
    /// the figment, so `REFCHECK_*` values can live there.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
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
        let local_path = PathBuf::from(".refcheck/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("REFCHECK_").split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("refcheck").join("config.toml"))
    }

    /// Check values figment cannot check by type alone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero timeout, an empty
    /// source name, or a base URL that is not `http(s)://`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(invalid("http.timeout_secs", "must be greater than zero"));
        }
        if self.general.source.trim().is_empty() {
            return Err(invalid("general.source", "must name a resolution source"));
        }
        for (field, url) in [
            ("crossref.base_url", &self.crossref.base_url),
            ("pubmed.base_url", &self.pubmed.base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(invalid(field, "must start with http:// or https://"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
