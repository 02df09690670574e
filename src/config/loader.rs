use crate::config::types::ClientConfig;
use crate::config::validator::ConfigValidatorImpl;
use crate::error::{EgeriaError, Result};
use crate::traits::ConfigValidator;
use std::path::Path;

/// Environment variable holding the platform API key
pub const API_KEY_ENV: &str = "API_KEY";

/// Configuration loader trait
pub trait ConfigLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ClientConfig>;
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<ClientConfig>;
}

/// Loads `ClientConfig` from a TOML file
pub struct DefaultConfigLoader;

impl ConfigLoader for DefaultConfigLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ClientConfig> {
        let content = std::fs::read_to_string(&path).map_err(|_| EgeriaError::ConfigNotFound {
            path: path.as_ref().to_path_buf(),
        })?;

        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load, overlay the environment, then validate
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<ClientConfig> {
        let config = Self::load_from_file(path)?.with_env_overrides(|key| std::env::var(key).ok());
        ConfigValidatorImpl::new().validate(&config)?;
        Ok(config)
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_from_file(path)
    }

    /// Load configuration, apply environment overrides and validate it
    pub fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_with_validation(path)
    }

    /// Fill `api_key` from [`API_KEY_ENV`] when the configuration has none.
    ///
    /// The lookup is injected so callers and tests control the environment.
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.api_key.is_none() {
            self.api_key = lookup(API_KEY_ENV).filter(|key| !key.is_empty());
        }
        self
    }
}
