//! Application configuration
//!
//! Values are layered: built-in defaults, then `config.toml` in the
//! platform config directory, then `PERENUAL_*` environment variables.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use plant_catalog::{CatalogConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use plant_store::AppName;
use serde::Deserialize;
use thiserror::Error;

pub const ENV_PREFIX: &str = "PERENUAL";
pub const CONFIG_FILE: &str = "config.toml";
/// Storage group holding the favorites slot
pub const STORE_GROUP: &str = "favorites";

pub fn app_name() -> AppName {
    AppName::new("com", "plant-favorites", "plant_favorites")
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("no API key configured: set PERENUAL_API_KEY or api_key in {}", .0.display())]
    MissingApiKey(PathBuf),
}

#[derive(Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl AppConfig {
    /// Load from the platform config file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(
            &config_file(),
            Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        )
    }

    /// Load from an explicit file and environment source
    ///
    /// The file may be absent. A blank API key is an error.
    pub fn load_from(file: &Path, env: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT.as_secs())?
            .add_source(File::from(file).required(false))
            .add_source(env)
            .build()?;

        let config: Self = settings.try_deserialize()?;
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey(file.to_path_buf()));
        }
        Ok(config)
    }

    pub fn catalog(&self) -> CatalogConfig {
        CatalogConfig::new(self.api_key.trim())
            .with_base_url(&self.base_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

/// Path of `config.toml` in the platform config directory
pub fn config_file() -> PathBuf {
    app_name().config_dir().join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(vars))
    }

    #[test]
    fn file_values_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "api_key = \"file-key\"\n").unwrap();

        let config = AppConfig::load_from(&path, env(&[])).unwrap();

        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT.as_secs());
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "api_key = \"file-key\"\ntimeout_secs = 5\n").unwrap();

        let config = AppConfig::load_from(
            &path,
            env(&[
                ("PERENUAL_API_KEY", "env-key"),
                ("PERENUAL_BASE_URL", "http://localhost:8080/api/"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.timeout_secs, 5);

        let catalog = config.catalog();
        assert_eq!(catalog.base_url, "http://localhost:8080/api");
        assert_eq!(catalog.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let err = AppConfig::load_from(&path, env(&[])).unwrap_err();

        assert!(matches!(err, ConfigError::MissingApiKey(ref file) if file == &path));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = AppConfig {
            api_key: "secret".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        };

        assert!(!format!("{config:?}").contains("secret"));
    }
}
