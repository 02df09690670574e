use crate::client::{EgeriaClient, ServiceCall};
use crate::config::ClientConfig;
use crate::error::{CallSite, Result};
use crate::http::ReqwestTransport;
use crate::traits::Transport;
use crate::validation::validate_guid;
use serde_json::Value;

const CLASS: &str = "ConnectedAsset";

/// Service whose connected-asset endpoints are used unless told otherwise
pub const DEFAULT_SERVICE_MARKER: &str = "asset-consumer";

/// Read-only view of an asset and its attachments through the common
/// connected-asset services of one access service
pub struct ConnectedAsset<T: Transport = ReqwestTransport> {
    client: EgeriaClient<T>,
    service: String,
}

impl ConnectedAsset<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(EgeriaClient::new(config)?))
    }
}

impl<T: Transport> ConnectedAsset<T> {
    pub fn from_client(client: EgeriaClient<T>) -> Self {
        Self::for_service(client, DEFAULT_SERVICE_MARKER)
    }

    /// Route calls through another access service, e.g. `asset-owner`
    pub fn for_service(client: EgeriaClient<T>, service_marker: &str) -> Self {
        Self {
            client,
            service: format!("common-services/{}/connected-asset", service_marker),
        }
    }

    pub async fn get_asset_summary(&self, asset_guid: &str, user_id: Option<&str>) -> Result<Value> {
        const SITE: CallSite = CallSite::new(CLASS, "get_asset_summary");
        validate_guid(asset_guid, "asset_guid", &SITE)?;

        let call = ServiceCall::get(&["assets", asset_guid]).user(user_id);
        self.client.call_field(&self.service, "asset", call, &SITE).await
    }

    pub async fn get_comments(
        &self,
        asset_guid: &str,
        start_from: i32,
        page_size: i32,
        user_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        const SITE: CallSite = CallSite::new(CLASS, "get_comments");
        validate_guid(asset_guid, "asset_guid", &SITE)?;
        self.client.validate_paging(start_from, page_size, &SITE)?;

        let call = elements(ServiceCall::get(&["assets", asset_guid, "comments"]), start_from, page_size).user(user_id);
        self.client.call_list(&self.service, "list", call, &SITE).await
    }

    pub async fn get_comment_replies(
        &self,
        asset_guid: &str,
        comment_guid: &str,
        start_from: i32,
        page_size: i32,
        user_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        const SITE: CallSite = CallSite::new(CLASS, "get_comment_replies");
        validate_guid(asset_guid, "asset_guid", &SITE)?;
        validate_guid(comment_guid, "comment_guid", &SITE)?;
        self.client.validate_paging(start_from, page_size, &SITE)?;

        let call = elements(
            ServiceCall::get(&["assets", asset_guid, "comments", comment_guid, "replies"]),
            start_from,
            page_size,
        )
        .user(user_id);
        self.client.call_list(&self.service, "list", call, &SITE).await
    }

    pub async fn get_related_assets(
        &self,
        asset_guid: &str,
        start_from: i32,
        page_size: i32,
        user_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        const SITE: CallSite = CallSite::new(CLASS, "get_related_assets");
        validate_guid(asset_guid, "asset_guid", &SITE)?;
        self.client.validate_paging(start_from, page_size, &SITE)?;

        let call = elements(ServiceCall::get(&["assets", asset_guid, "related-assets"]), start_from, page_size)
            .user(user_id);
        self.client.call_list(&self.service, "list", call, &SITE).await
    }
}

// connected-asset endpoints page with elementStart/maxElements
fn elements(call: ServiceCall<'_>, start_from: i32, page_size: i32) -> ServiceCall<'_> {
    call.query("elementStart", start_from).query("maxElements", page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_code::ErrorCode;
    use crate::testing::MockTransport;
    use crate::types::RawResponse;

    fn connected(transport: &MockTransport) -> ConnectedAsset<MockTransport> {
        let mut config = ClientConfig::new("https://localhost:9443", "cocoMDS2");
        config.user_id = Some("erinoverview".to_string());
        ConnectedAsset::from_client(EgeriaClient::with_transport(config, transport.clone()).unwrap())
    }

    #[tokio::test]
    async fn test_comments_endpoint_and_paging_names() {
        let transport = MockTransport::new().with_response(RawResponse::new(
            200,
            r#"{"relatedHTTPCode":200,"list":[{"comment":{"commentText":"ok"}}]}"#,
            "",
        ));

        let comments = connected(&transport).get_comments("asset-1", 0, 25, None).await.unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(
            transport.requests()[0].endpoint,
            "https://localhost:9443/servers/cocoMDS2/open-metadata/common-services/asset-consumer/connected-asset/users/erinoverview/assets/asset-1/comments?elementStart=0&maxElements=25"
        );
    }

    #[tokio::test]
    async fn test_other_service_marker() {
        let transport = MockTransport::new();
        let mut config = ClientConfig::new("https://localhost:9443", "cocoMDS2");
        config.user_id = Some("erinoverview".to_string());
        let client = EgeriaClient::with_transport(config, transport.clone()).unwrap();

        ConnectedAsset::for_service(client, "asset-owner")
            .get_related_assets("asset-1", 0, 0, None)
            .await
            .unwrap();

        assert!(transport.requests()[0]
            .endpoint
            .contains("/common-services/asset-owner/connected-asset/users/erinoverview/assets/asset-1/related-assets"));
    }

    #[tokio::test]
    async fn test_reply_guid_validation() {
        let transport = MockTransport::new();
        let err = connected(&transport)
            .get_comment_replies("asset-1", "", 0, 10, None)
            .await
            .unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::NullGuid));
        assert_eq!(transport.call_count(), 0);
    }
}
