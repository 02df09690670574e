use egeria_client::config::{ConfigLoader, DefaultConfigLoader, DEFAULT_TIMEOUT_SECONDS};
use egeria_client::{ClientConfig, EgeriaClient, EgeriaError, ErrorCode};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("egeria.toml");
    fs::write(&path, content).unwrap();
    path
}

#[cfg(test)]
mod loader_tests {
    use super::*;

    #[test]
    fn test_load_minimal_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"platform_url = "https://localhost:9443"
server_name = "cocoMDS2"
"#,
        );

        let config = DefaultConfigLoader::load_from_file(&path).unwrap();

        assert_eq!(config.platform_url, "https://localhost:9443");
        assert_eq!(config.server_name, "cocoMDS2");
        assert_eq!(config.user_id, None);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert!(config.verify_tls);
    }

    #[test]
    fn test_load_full_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"platform_url = "https://egeria.example.com:9443"
server_name = "cocoMDS1"
user_id = "peterprofile"
timeout_seconds = 10
verify_tls = false
api_key = "from-file"
max_page_size = 500

[headers]
X-Correlation-Id = "nightly-sync"
"#,
        );

        let config = ClientConfig::load_with_validation(&path).unwrap();

        assert_eq!(config.user_id.as_deref(), Some("peterprofile"));
        assert_eq!(config.timeout_seconds, 10);
        assert!(!config.verify_tls);
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.max_page_size, 500);
        assert_eq!(config.headers.get("X-Correlation-Id").map(String::as_str), Some("nightly-sync"));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = ClientConfig::load_from_file(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(EgeriaError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "platform_url = [unterminated");
        assert!(matches!(ClientConfig::load_from_file(&path), Err(EgeriaError::ConfigParse(_))));
    }

    #[test]
    fn test_empty_url_in_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"platform_url = ""
server_name = "cocoMDS2"
"#,
        );

        let err = EgeriaClient::from_file(&path).err().unwrap();
        assert_eq!(err.code(), Some(ErrorCode::ServerUrlNotSpecified));
    }
}

#[cfg(test)]
mod env_override_tests {
    use super::*;

    #[test]
    fn test_api_key_filled_from_lookup() {
        let config = ClientConfig::new("https://localhost:9443", "cocoMDS2")
            .with_env_overrides(|key| (key == "API_KEY").then(|| "from-env".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let mut config = ClientConfig::new("https://localhost:9443", "cocoMDS2");
        config.api_key = Some("explicit".to_string());

        let config = config.with_env_overrides(|_| Some("from-env".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("explicit"));
    }
}
