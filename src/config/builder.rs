use crate::config::types::ClientConfig;
use crate::config::validator::ConfigValidatorImpl;
use crate::error::Result;
use crate::traits::ConfigValidator;

/// Builder for ClientConfig
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::new("", ""),
        }
    }

    #[must_use]
    pub fn platform_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.platform_url = url.into();
        self
    }

    #[must_use]
    pub fn server_name<S: Into<String>>(mut self, server_name: S) -> Self {
        self.config.server_name = server_name.into();
        self
    }

    #[must_use]
    pub fn user_id<S: Into<String>>(mut self, user_id: S) -> Self {
        self.config.user_id = Some(user_id.into());
        self
    }

    /// Set timeout in seconds
    #[must_use]
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config.timeout_seconds = seconds;
        self
    }

    #[must_use]
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.config.verify_tls = verify;
        self
    }

    #[must_use]
    pub fn api_key<S: Into<String>>(mut self, key: S) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn max_page_size(mut self, max: i32) -> Self {
        self.config.max_page_size = max;
        self
    }

    /// Add a header sent on every request
    #[must_use]
    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ClientConfig> {
        ConfigValidatorImpl::new().validate(&self.config)?;
        Ok(self.config)
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
