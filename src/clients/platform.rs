use crate::client::{take_strings, EgeriaClient};
use crate::config::ClientConfig;
use crate::error::{CallSite, Result};
use crate::http::ReqwestTransport;
use crate::traits::Transport;
use crate::types::{HttpMethod, RequestDescriptor};
use crate::validation::validate_server_name;

const CLASS: &str = "Platform";

/// OMAG Server Platform services: platform origin and server lifecycle.
///
/// Operations that take a `server` fall back to the connection's server
/// name when it is `None`.
pub struct Platform<T: Transport = ReqwestTransport> {
    client: EgeriaClient<T>,
}

impl Platform<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(EgeriaClient::new(config)?))
    }
}

impl<T: Transport> Platform<T> {
    pub fn from_client(client: EgeriaClient<T>) -> Self {
        Self { client }
    }

    /// Description of the platform's implementation, returned as plain text
    pub async fn get_origin(&self, user_id: Option<&str>) -> Result<String> {
        const SITE: CallSite = CallSite::new(CLASS, "get_origin");
        let endpoint = self.endpoint(&SITE, user_id, &["origin"])?;
        self.client
            .dispatcher()
            .send_text(RequestDescriptor::get(endpoint), &SITE)
            .await
    }

    /// Start the server using its stored configuration document
    pub async fn activate_server(&self, server: Option<&str>, user_id: Option<&str>) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "activate_server");
        let server = self.server(server, &SITE)?;
        let endpoint = self.endpoint(&SITE, user_id, &["servers", server, "instance"])?;
        self.client
            .dispatcher()
            .send_envelope(RequestDescriptor::new(HttpMethod::Post, endpoint), &SITE)
            .await
            .map(|_| ())
    }

    pub async fn shutdown_server(&self, server: Option<&str>, user_id: Option<&str>) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "shutdown_server");
        let server = self.server(server, &SITE)?;
        let endpoint = self.endpoint(&SITE, user_id, &["servers", server, "instance"])?;
        self.client
            .dispatcher()
            .send_envelope(RequestDescriptor::delete(endpoint), &SITE)
            .await
            .map(|_| ())
    }

    /// Servers that have run on this platform since it started
    pub async fn list_known_servers(&self, user_id: Option<&str>) -> Result<Vec<String>> {
        const SITE: CallSite = CallSite::new(CLASS, "list_known_servers");
        let endpoint = self.endpoint(&SITE, user_id, &["servers"])?;
        self.server_list(endpoint, &SITE).await
    }

    pub async fn list_active_servers(&self, user_id: Option<&str>) -> Result<Vec<String>> {
        const SITE: CallSite = CallSite::new(CLASS, "list_active_servers");
        let endpoint = self.endpoint(&SITE, user_id, &["servers", "active"])?;
        self.server_list(endpoint, &SITE).await
    }

    pub async fn is_server_known(&self, server: Option<&str>, user_id: Option<&str>) -> Result<bool> {
        const SITE: CallSite = CallSite::new(CLASS, "is_server_known");
        let server = self.server(server, &SITE)?;
        let endpoint = self.endpoint(&SITE, user_id, &["servers", server, "is-known"])?;
        self.client
            .dispatcher()
            .send_required(RequestDescriptor::get(endpoint), &SITE, |envelope| envelope.flag())
            .await
    }

    async fn server_list(&self, endpoint: String, site: &CallSite) -> Result<Vec<String>> {
        let mut envelope = self
            .client
            .dispatcher()
            .send_envelope(RequestDescriptor::get(endpoint), site)
            .await?;
        Ok(take_strings(&mut envelope, "serverList"))
    }

    fn server<'a>(&'a self, server: Option<&'a str>, site: &CallSite) -> Result<&'a str> {
        let server = server.unwrap_or(self.client.server_name());
        validate_server_name(server, site)?;
        Ok(server)
    }

    fn endpoint(&self, site: &CallSite, user_id: Option<&str>, path: &[&str]) -> Result<String> {
        let user_id = self.client.resolve_user_id(user_id, site)?;
        Ok(self.client.platform_endpoint(user_id, site)?.segments(path).build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EgeriaError;
    use crate::error_code::ErrorCode;
    use crate::testing::MockTransport;
    use crate::types::RawResponse;

    fn platform(transport: &MockTransport) -> Platform<MockTransport> {
        let mut config = ClientConfig::new("https://127.0.0.1:9443", "cocoMDS2");
        config.user_id = Some("garygeeke".to_string());
        Platform::from_client(EgeriaClient::with_transport(config, transport.clone()).unwrap())
    }

    #[tokio::test]
    async fn test_activate_defaults_to_connection_server() {
        let transport = MockTransport::new();
        platform(&transport).activate_server(None, None).await.unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.endpoint,
            "https://127.0.0.1:9443/open-metadata/platform-services/users/garygeeke/server-platform/servers/cocoMDS2/instance"
        );
    }

    #[tokio::test]
    async fn test_shutdown_named_server() {
        let transport = MockTransport::new();
        platform(&transport).shutdown_server(Some("cocoMDS4"), None).await.unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Delete);
        assert!(request.endpoint.ends_with("/server-platform/servers/cocoMDS4/instance"));
    }

    #[tokio::test]
    async fn test_empty_server_name_rejected() {
        let transport = MockTransport::new();
        let err = platform(&transport).is_server_known(Some(""), None).await.unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::ServerNameNotSpecified));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_is_server_known_reads_flag() {
        let transport = MockTransport::new().with_response(RawResponse::new(200, r#"{"relatedHTTPCode":200,"flag":false}"#, ""));
        assert!(!platform(&transport).is_server_known(None, None).await.unwrap());
    }

    #[tokio::test]
    async fn test_origin_envelope_is_unexpected() {
        let transport = MockTransport::new();
        let err = platform(&transport).get_origin(None).await.unwrap_err();
        assert!(matches!(err, EgeriaError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn test_server_list() {
        let transport = MockTransport::new().with_response(RawResponse::new(
            200,
            r#"{"relatedHTTPCode":200,"serverList":["cocoMDS1","cocoMDS2"]}"#,
            "",
        ));

        let servers = platform(&transport).list_active_servers(None).await.unwrap();
        assert_eq!(servers, vec!["cocoMDS1".to_string(), "cocoMDS2".to_string()]);
        assert!(transport.requests()[0].endpoint.ends_with("/server-platform/servers/active"));
    }
}
