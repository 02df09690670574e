//! `API_KEY` handling. Kept in its own test binary because it sets a
//! process-wide environment variable.

mod common;

use common::*;
use egeria_client::{AssetConsumer, EgeriaClient};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_env_api_key_applies_to_built_configs() {
    std::env::set_var("API_KEY", "from-env");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(service_path("asset-consumer", USER, "meanings/term-1")))
        .and(header("x-api-key", "from-env"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "meaning": { "displayName": "Customer" }
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(service_path("asset-consumer", USER, "meanings/term-2")))
        .and(header("x-api-key", "explicit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "meaning": { "displayName": "Supplier" }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    // builder path, no key in the config
    let consumer = AssetConsumer::new(config_for(&server)).unwrap();
    assert_eq!(consumer.client().config().api_key.as_deref(), Some("from-env"));
    consumer.get_meaning("term-1", None).await.unwrap();

    // an explicit key still wins
    let mut config = config_for(&server);
    config.api_key = Some("explicit".to_string());
    let consumer = AssetConsumer::from_client(EgeriaClient::new(config).unwrap());
    consumer.get_meaning("term-2", None).await.unwrap();
}
