use crate::config::ClientConfig;
use crate::error::{EgeriaError, Result, TransportError, TransportErrorKind};
use crate::types::RequestDescriptor;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Request};
use serde_json::json;

/// `class` sent when a POST or PUT has nothing else to say
pub const NULL_REQUEST_BODY_CLASS: &str = "NullRequestBody";

const API_KEY_HEADER: &str = "x-api-key";

/// Turns a [`RequestDescriptor`] into a `reqwest::Request`
#[derive(Clone)]
pub struct RequestBuilderImpl {
    client: Client,
    default_headers: HeaderMap,
}

impl RequestBuilderImpl {
    /// Create a new request builder with the connection-wide headers from `config`
    pub fn new(client: Client, config: &ClientConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &config.headers {
            let (name, value) = parse_header(name, value).map_err(|e| EgeriaError::invalid_config(e.message()))?;
            default_headers.insert(name, value);
        }

        if let Some(api_key) = config.api_key.as_deref() {
            let value = HeaderValue::from_str(api_key)
                .map_err(|_| EgeriaError::invalid_config("API key contains characters not allowed in a header"))?;
            default_headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        }

        Ok(Self {
            client,
            default_headers,
        })
    }

    pub fn build_request(&self, request: &RequestDescriptor) -> std::result::Result<Request, TransportError> {
        let mut builder = self
            .client
            .request(request.method.into(), request.endpoint.as_str())
            .headers(self.default_headers.clone());

        for (name, value) in &request.headers {
            let (name, value) = parse_header(name, value)?;
            builder = builder.header(name, value);
        }

        if request.method.has_body() {
            let body = request
                .body
                .clone()
                .unwrap_or_else(|| json!({ "class": NULL_REQUEST_BODY_CLASS }));
            builder = builder.json(&body);
        } else if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().map_err(Into::into)
    }
}

fn parse_header(name: &str, value: &str) -> std::result::Result<(HeaderName, HeaderValue), TransportError> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| TransportError::new(TransportErrorKind::Request, format!("Invalid header name '{}'", name)))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|_| TransportError::new(TransportErrorKind::Request, format!("Invalid value for header '{}'", name)))?;
    Ok((header_name, header_value))
}
