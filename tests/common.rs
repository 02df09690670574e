//! Shared helpers for the integration tests: configurations pointed at a
//! wiremock platform and canned Egeria response envelopes.

#![allow(dead_code)]

use egeria_client::{ClientConfig, EgeriaClient};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const SERVER: &str = "cocoMDS2";
pub const USER: &str = "erinoverview";

/// Configuration for a platform served by `server`
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .platform_url(server.uri())
        .server_name(SERVER)
        .user_id(USER)
        .timeout(5)
        .build()
        .unwrap()
}

pub fn client_for(server: &MockServer) -> EgeriaClient {
    EgeriaClient::new(config_for(server)).unwrap()
}

/// Path of an access-service endpoint for `user`
pub fn service_path(service: &str, user: &str, rest: &str) -> String {
    format!("/servers/{}/open-metadata/access-services/{}/users/{}/{}", SERVER, service, user, rest)
}

pub fn platform_path(user: &str, rest: &str) -> String {
    format!("/open-metadata/platform-services/users/{}/server-platform/{}", user, rest)
}

/// A successful envelope carrying `fields`
pub fn ok_envelope(fields: Value) -> Value {
    let mut envelope = json!({ "class": "VoidResponse", "relatedHTTPCode": 200 });
    if let (Some(target), Value::Object(extra)) = (envelope.as_object_mut(), fields) {
        target.extend(extra);
    }
    envelope
}

/// A failed envelope as the platform returns it inside a 200 response
pub fn failed_envelope(related: u16, message: &str) -> Value {
    json!({
        "class": "VoidResponse",
        "relatedHTTPCode": related,
        "exceptionClassName": "org.odpi.openmetadata.frameworks.connectors.ffdc.InvalidParameterException",
        "exceptionErrorMessage": message,
        "exceptionSystemAction": "The system is unable to process the request.",
        "exceptionUserAction": "Correct the request and retry.",
    })
}
