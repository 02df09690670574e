pub mod types;
pub mod loader;
pub mod builder;
pub mod validator;

pub use types::{ClientConfig, DEFAULT_TIMEOUT_SECONDS};
pub use loader::{ConfigLoader, DefaultConfigLoader, API_KEY_ENV};
pub use builder::ClientConfigBuilder;
pub use validator::ConfigValidatorImpl;
