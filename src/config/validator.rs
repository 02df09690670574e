use crate::config::types::ClientConfig;
use crate::error::{CallSite, EgeriaError, Result};
use crate::traits::ConfigValidator;
use crate::validation::{validate_server_name, validate_url};
use reqwest::header::{HeaderName, HeaderValue};

const SITE: CallSite = CallSite::new("ClientConfig", "validate");

/// Configuration validator implementation
pub struct ConfigValidatorImpl;

impl ConfigValidator for ConfigValidatorImpl {
    type Config = ClientConfig;

    /// Check the platform URL first, then the rest of the settings.
    ///
    /// URL and server name problems surface as `InvalidParameter` with the
    /// matching error code; everything else is `InvalidConfig`.
    fn validate(&self, config: &ClientConfig) -> Result<()> {
        validate_url(&config.platform_url, &SITE)?;
        validate_server_name(&config.server_name, &SITE)?;

        if !(1..=300).contains(&config.timeout_seconds) {
            return Err(EgeriaError::invalid_config(format!(
                "timeout_seconds must be between 1 and 300, got {}",
                config.timeout_seconds
            )));
        }

        if config.max_page_size <= 0 {
            return Err(EgeriaError::invalid_config(format!(
                "max_page_size must be positive, got {}",
                config.max_page_size
            )));
        }

        if matches!(config.user_id.as_deref(), Some(user) if user.trim().is_empty()) {
            return Err(EgeriaError::invalid_config("user_id is set but empty"));
        }

        for (name, value) in &config.headers {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| EgeriaError::invalid_config(format!("Invalid header name '{}'", name)))?;
            HeaderValue::from_str(value)
                .map_err(|_| EgeriaError::invalid_config(format!("Invalid value for header '{}'", name)))?;
        }

        Ok(())
    }
}

impl ConfigValidatorImpl {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConfigValidatorImpl {
    fn default() -> Self {
        Self::new()
    }
}
