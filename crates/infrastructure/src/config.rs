//! Client configuration.
//!
//! Layers, lowest priority first:
//! 1. built-in defaults
//! 2. `medportal.toml` in the working directory, or an explicit file
//! 3. `MEDPORTAL_*` environment variables (`MEDPORTAL_API_BASE`,
//!    `MEDPORTAL_TIMEOUT_MS`, `MEDPORTAL_STORAGE_PATH`)

use std::path::{Path, PathBuf};
use std::time::Duration;

use ::config::{Config, Environment, File};
use medportal_application::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::persistence::default_storage_path;

/// Base name of the optional configuration file.
pub const CONFIG_FILE: &str = "medportal";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "MEDPORTAL";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or merged.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// A value was read but is unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// No storage path was configured and the system has no data directory.
    #[error("no storage location available; set {ENV_PREFIX}_STORAGE_PATH")]
    NoStorageLocation,
}

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PortalConfig {
    /// Backend base URL.
    pub api_base: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Session storage file. Defaults to the per-user data directory.
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_BASE_URL.to_string(),
            timeout_ms: u64::try_from(DEFAULT_TIMEOUT.as_millis()).unwrap_or(15_000),
            storage_path: None,
        }
    }
}

impl PortalConfig {
    /// Loads configuration. With `file`, that file must exist; otherwise an
    /// optional `medportal.toml` in the working directory is used.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is unreadable or a value is invalid.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let builder = Config::builder()
            .set_default("api_base", defaults.api_base)?
            .set_default("timeout_ms", i64::try_from(defaults.timeout_ms).unwrap_or(15_000))?;

        let builder = match file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(CONFIG_FILE).required(false)),
        };

        let config: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        tracing::debug!(api_base = %config.api_base, timeout_ms = config.timeout_ms, "configuration loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_base)
            .map_err(|e| ConfigError::Invalid(format!("api_base '{}': {e}", self.api_base)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "api_base must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be positive".to_string()));
        }
        Ok(())
    }

    /// Returns the gateway configuration.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_base.clone())
            .with_timeout(Duration::from_millis(self.timeout_ms))
    }

    /// Returns the configured storage path or the per-user default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoStorageLocation` if neither is available.
    pub fn storage_path(&self) -> Result<PathBuf, ConfigError> {
        self.storage_path
            .clone()
            .or_else(default_storage_path)
            .ok_or(ConfigError::NoStorageLocation)
    }
}
