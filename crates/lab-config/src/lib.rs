//! # lab-config
//!
//! Layered configuration loading for the learning lab using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LAB_*` prefix, `__` as separator)
//! 2. Project-level `./lab.toml`
//! 3. User-level `~/.config/lab/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LAB_SERVER__PORT` -> `server.port`, `LAB_SANDBOX__THREADS` -> `sandbox.threads`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use lab_config::LabConfig;
//!
//! let config = LabConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.socket_addr().expect("addr"));
//! ```

mod error;
mod sandbox;
mod server;

pub use error::ConfigError;
pub use sandbox::SandboxConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file name, resolved against the working directory.
pub const LOCAL_CONFIG_FILE: &str = "lab.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LabConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sandbox: SandboxConfig,
}

impl LabConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`. Use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] if the merged values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer more providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("LAB_").split("__"))
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.sandbox.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lab").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LabConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 3000);
        assert!(config.sandbox.allow_external_access);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config = LabConfig::from_figment(&LabConfig::figment()).expect("defaults load");
            assert_eq!(config.server.host, "127.0.0.1");
            Ok(())
        });
    }
}
