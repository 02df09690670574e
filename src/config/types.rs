use crate::validation::DEFAULT_MAX_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Request timeout used when the configuration does not set one
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Connection settings shared by every resource client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the OMAG Server Platform, e.g. `https://localhost:9443`
    pub platform_url: String,
    /// Server that service calls are routed to
    pub server_name: String,
    /// Identity used when a call does not supply its own
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Set to false only for development platforms with self-signed certificates
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
    /// Sent as `x-api-key` on every request
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: i32,
    /// Extra headers applied to all requests
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl ClientConfig {
    /// Create a configuration with default settings
    pub fn new<U: Into<String>, S: Into<String>>(platform_url: U, server_name: S) -> Self {
        Self {
            platform_url: platform_url.into(),
            server_name: server_name.into(),
            user_id: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            verify_tls: true,
            api_key: None,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            headers: BTreeMap::new(),
        }
    }

    /// Create a new config builder
    pub fn builder() -> crate::config::builder::ClientConfigBuilder {
        crate::config::builder::ClientConfigBuilder::new()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_verify_tls() -> bool {
    true
}

fn default_max_page_size() -> i32 {
    DEFAULT_MAX_PAGE_SIZE
}
