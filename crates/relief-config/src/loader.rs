//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, ConfigError, Environment, File};
use relief_core::ReliefError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `RELIEF__` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, ReliefError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, ReliefError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    ///
    /// Components built from an earlier snapshot (such as the response cache)
    /// keep the values they were constructed with.
    pub async fn reload(&self) -> Result<(), ReliefError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, ReliefError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("RELIEF_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("RELIEF")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_relief_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_relief_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Gets a specific configuration value by key path.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

/// Validates the configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), ReliefError> {
    if config.storage.database_url.is_empty() {
        return Err(ReliefError::Configuration(
            "storage.database_url is required".to_string(),
        ));
    }

    if config.cache.enabled && config.cache.ttl_secs == 0 {
        return Err(ReliefError::Configuration(
            "cache.ttl_secs must be greater than zero".to_string(),
        ));
    }

    if config.storage.blob_root.is_empty() {
        return Err(ReliefError::Configuration(
            "storage.blob_root is required".to_string(),
        ));
    }

    Ok(())
}

fn config_error_to_relief_error(err: ConfigError) -> ReliefError {
    ReliefError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
            [cache]
            ttl_secs = 90
            max_retries = 3

            [server]
            port = 3000
            "#,
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string()).unwrap();
        let config = loader.get().await;
        assert_eq!(config.cache.ttl_secs, 90);
        assert_eq!(config.cache.max_retries, 3);
        assert_eq!(config.cache.retry_delay_ms, 100);
        assert_eq!(config.server.port, 3000);
    }

    #[tokio::test]
    async fn test_local_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[cache]\nttl_secs = 90\n").unwrap();
        fs::write(dir.path().join("local.toml"), "[cache]\nttl_secs = 15\n").unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string()).unwrap();
        assert_eq!(loader.get().await.cache.ttl_secs, 15);
    }

    #[tokio::test]
    async fn test_get_value_by_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[cache]\nretry_delay_ms = 250\n").unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string()).unwrap();
        let delay: Option<u64> = loader.get_value("cache.retry_delay_ms").await;
        assert_eq!(delay, Some(250));
        let missing: Option<u64> = loader.get_value("cache.nope").await;
        assert!(missing.is_none());
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let mut config = AppConfig::default();
        config.cache.ttl_secs = 0;
        assert!(validate_config(&config).is_err());

        config.cache.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_database_url() {
        let mut config = AppConfig::default();
        config.storage.database_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }
}
