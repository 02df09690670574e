use crate::client::{EgeriaClient, ServiceCall};
use crate::config::ClientConfig;
use crate::error::{CallSite, EgeriaError, Result};
use crate::error_code::ErrorCode;
use crate::http::ReqwestTransport;
use crate::traits::Transport;
use crate::validation::{validate_array, validate_guid, validate_name, validate_search_string};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const SERVICE: &str = "access-services/asset-owner";
const CLASS: &str = "AssetOwner";

/// How an owner identifier should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnerType {
    UserId,
    ProfileId,
    Other,
}

/// Where an asset came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetOrigin<'a> {
    pub contact: Option<&'a str>,
    pub originating_dept: Option<&'a str>,
    pub originating_organization: Option<&'a str>,
}

impl AssetOrigin<'_> {
    fn is_empty(&self) -> bool {
        self.contact.is_none() && self.originating_dept.is_none() && self.originating_organization.is_none()
    }
}

/// Asset Owner OMAS client: catalog, govern and remove assets
pub struct AssetOwner<T: Transport = ReqwestTransport> {
    client: EgeriaClient<T>,
}

impl AssetOwner<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(EgeriaClient::new(config)?))
    }
}

impl<T: Transport> AssetOwner<T> {
    pub fn from_client(client: EgeriaClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &EgeriaClient<T> {
        &self.client
    }

    /// Catalog a CSV file. Returns the guids of every element created
    /// (asset, connection, schema ...).
    pub async fn create_csv_asset(
        &self,
        display_name: &str,
        description: Option<&str>,
        full_path: &str,
        column_headers: Option<&[String]>,
        user_id: Option<&str>,
    ) -> Result<Vec<String>> {
        const SITE: CallSite = CallSite::new(CLASS, "create_csv_asset");
        validate_name(display_name, "display_name", &SITE)?;
        validate_name(full_path, "full_path", &SITE)?;
        if let Some(headers) = column_headers {
            validate_array(headers, "column_headers", &SITE)?;
        }

        let mut body = json!({
            "class": "NewCSVFileAssetRequestBody",
            "displayName": display_name,
            "description": description,
            "fullPath": full_path,
        });
        if let Some(headers) = column_headers {
            body["columnHeaders"] = json!(headers);
        }

        let call = ServiceCall::post(&["assets", "data-files", "csv"]).body(body).user(user_id);
        self.client.call_strings(SERVICE, "guids", call, &SITE).await
    }

    pub async fn create_avro_asset(
        &self,
        display_name: &str,
        description: Option<&str>,
        full_path: &str,
        user_id: Option<&str>,
    ) -> Result<Vec<String>> {
        const SITE: CallSite = CallSite::new(CLASS, "create_avro_asset");
        validate_name(display_name, "display_name", &SITE)?;
        validate_name(full_path, "full_path", &SITE)?;

        let call = ServiceCall::post(&["assets", "data-files", "avro"])
            .body(json!({
                "class": "NewFileAssetRequestBody",
                "displayName": display_name,
                "description": description,
                "fullPath": full_path,
            }))
            .user(user_id);
        self.client.call_strings(SERVICE, "guids", call, &SITE).await
    }

    pub async fn delete_asset(&self, asset_guid: &str, user_id: Option<&str>) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "delete_asset");
        validate_guid(asset_guid, "asset_guid", &SITE)?;

        let call = ServiceCall::post(&["assets", asset_guid, "delete"]).user(user_id);
        self.client.call_unit(SERVICE, call, &SITE).await
    }

    /// Full asset descriptions matching the regular expression `search_string`
    pub async fn search_assets(
        &self,
        search_string: &str,
        start_from: i32,
        page_size: i32,
        user_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        const SITE: CallSite = CallSite::new(CLASS, "search_assets");
        validate_search_string(search_string, "search_string", &SITE)?;
        self.client.validate_paging(start_from, page_size, &SITE)?;

        let call = ServiceCall::post(&["assets", "by-search-string"])
            .query("startFrom", start_from)
            .query("pageSize", page_size)
            .body(json!({ "class": "SearchStringRequestBody", "searchString": search_string }))
            .user(user_id);
        self.client.call_list(SERVICE, "assets", call, &SITE).await
    }

    pub async fn add_owner(
        &self,
        asset_guid: &str,
        owner_id: &str,
        owner_type: OwnerType,
        user_id: Option<&str>,
    ) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "add_owner");
        validate_guid(asset_guid, "asset_guid", &SITE)?;
        validate_name(owner_id, "owner_id", &SITE)?;

        let call = ServiceCall::post(&["assets", asset_guid, "owner"])
            .body(json!({
                "class": "OwnerRequestBody",
                "ownerType": owner_type,
                "ownerId": owner_id,
            }))
            .user(user_id);
        self.client.call_unit(SERVICE, call, &SITE).await
    }

    pub async fn add_origin(&self, asset_guid: &str, origin: &AssetOrigin<'_>, user_id: Option<&str>) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "add_origin");
        validate_guid(asset_guid, "asset_guid", &SITE)?;
        if origin.is_empty() {
            return Err(EgeriaError::invalid_parameter(ErrorCode::NullObject, &SITE, &["origin", SITE.method_name]));
        }

        let call = ServiceCall::post(&["assets", asset_guid, "origin"])
            .body(json!({
                "class": "OriginRequestBody",
                "otherOriginValues": {
                    "contact": origin.contact,
                    "originatingDept": origin.originating_dept,
                    "originatingOrganization": origin.originating_organization,
                },
            }))
            .user(user_id);
        self.client.call_unit(SERVICE, call, &SITE).await
    }

    /// Replace the governance zones the asset is a member of
    pub async fn add_governance_zones(&self, asset_guid: &str, zones: &[String], user_id: Option<&str>) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "add_governance_zones");
        validate_guid(asset_guid, "asset_guid", &SITE)?;
        validate_array(zones, "zones", &SITE)?;

        let call = ServiceCall::post(&["assets", asset_guid, "governance-zones"])
            .body(json!(zones))
            .user(user_id);
        self.client.call_unit(SERVICE, call, &SITE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use crate::types::RawResponse;

    fn owner(transport: &MockTransport) -> AssetOwner<MockTransport> {
        let mut config = ClientConfig::new("https://localhost:9443", "cocoMDS1");
        config.user_id = Some("peterprofile".to_string());
        AssetOwner::from_client(EgeriaClient::with_transport(config, transport.clone()).unwrap())
    }

    #[tokio::test]
    async fn test_create_csv_asset_with_headers() {
        let transport = MockTransport::new().with_response(RawResponse::new(
            200,
            r#"{"relatedHTTPCode":200,"guids":["asset","connection","schema"]}"#,
            "",
        ));
        let headers = vec!["id".to_string(), "name".to_string()];

        let guids = owner(&transport)
            .create_csv_asset("Week 1", None, "file://data/week1.csv", Some(headers.as_slice()), None)
            .await
            .unwrap();

        assert_eq!(guids.len(), 3);
        let request = &transport.requests()[0];
        assert!(request.endpoint.ends_with("/access-services/asset-owner/users/peterprofile/assets/data-files/csv"));
        assert_eq!(request.body.as_ref().unwrap()["columnHeaders"], json!(["id", "name"]));
        assert_eq!(request.body.as_ref().unwrap()["description"], Value::Null);
    }

    #[tokio::test]
    async fn test_empty_column_headers_rejected() {
        let transport = MockTransport::new();
        let err = owner(&transport)
            .create_csv_asset("Week 1", None, "file://data/week1.csv", Some(&[][..]), None)
            .await
            .unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::NullArrayParameter));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_origin_rejected() {
        let transport = MockTransport::new();
        let err = owner(&transport)
            .add_origin("asset-1", &AssetOrigin::default(), None)
            .await
            .unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::NullObject));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_owner_body() {
        let transport = MockTransport::new();
        owner(&transport)
            .add_owner("asset-1", "erinoverview", OwnerType::UserId, None)
            .await
            .unwrap();

        assert_eq!(
            transport.requests()[0].body,
            Some(json!({"class": "OwnerRequestBody", "ownerType": "USER_ID", "ownerId": "erinoverview"}))
        );
    }

    #[tokio::test]
    async fn test_search_assets_reads_assets_field() {
        let transport = MockTransport::new().with_response(RawResponse::new(
            200,
            r#"{"relatedHTTPCode":200,"assets":[{"elementHeader":{"guid":"a1"}}]}"#,
            "",
        ));

        let assets = owner(&transport).search_assets("week.*", 0, 50, None).await.unwrap();
        assert_eq!(assets[0]["elementHeader"]["guid"], "a1");
    }
}
