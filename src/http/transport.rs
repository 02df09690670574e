use crate::config::ClientConfig;
use crate::error::{EgeriaError, Result, TransportError};
use crate::http::RequestBuilderImpl;
use crate::traits::Transport;
use crate::types::{RawResponse, RequestDescriptor};
use reqwest::Client;

/// Production transport over a pooled `reqwest::Client`.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    request_builder: RequestBuilderImpl,
}

impl ReqwestTransport {
    /// Create a new transport with the timeout, TLS and header settings from `config`
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| EgeriaError::invalid_config(format!("Failed to build HTTP client: {}", e)))?;

        let request_builder = RequestBuilderImpl::new(client.clone(), config)?;

        Ok(Self {
            client,
            request_builder,
        })
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestDescriptor) -> std::result::Result<RawResponse, TransportError> {
        let http_request = self.request_builder.build_request(request)?;
        let response = self.client.execute(http_request).await?;

        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text().await?;

        Ok(RawResponse::new(status, body, url))
    }
}
