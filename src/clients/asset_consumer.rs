//! Asset Consumer OMAS client.
//!
//! Search for assets and glossary meanings, and attach feedback (comments,
//! likes, ratings and informal tags) to assets.

use crate::client::{EgeriaClient, ServiceCall};
use crate::config::ClientConfig;
use crate::error::{CallSite, Result};
use crate::http::ReqwestTransport;
use crate::traits::Transport;
use crate::types::{CommentType, StarRating};
use crate::validation::{validate_guid, validate_name, validate_search_string, validate_text};
use serde_json::{json, Value};

const SERVICE: &str = "access-services/asset-consumer";
const CLASS: &str = "AssetConsumer";

pub struct AssetConsumer<T: Transport = ReqwestTransport> {
    client: EgeriaClient<T>,
}

impl AssetConsumer<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(EgeriaClient::new(config)?))
    }
}

impl<T: Transport> AssetConsumer<T> {
    /// Share an existing connection
    pub fn from_client(client: EgeriaClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &EgeriaClient<T> {
        &self.client
    }

    // -- Assets and meanings --

    /// Guids of assets whose properties match the regular expression `search_string`
    pub async fn find_assets(
        &self,
        search_string: &str,
        start_from: i32,
        page_size: i32,
        user_id: Option<&str>,
    ) -> Result<Vec<String>> {
        const SITE: CallSite = CallSite::new(CLASS, "find_assets");
        validate_search_string(search_string, "search_string", &SITE)?;
        self.client.validate_paging(start_from, page_size, &SITE)?;

        let call = paged(ServiceCall::post(&["assets", "by-search-string"]), start_from, page_size)
            .body(search_string_body(search_string))
            .user(user_id);
        self.client.call_strings(SERVICE, "guids", call, &SITE).await
    }

    /// Guids of assets linked to the glossary term `term_guid`
    pub async fn get_assets_by_meaning(
        &self,
        term_guid: &str,
        start_from: i32,
        page_size: i32,
        user_id: Option<&str>,
    ) -> Result<Vec<String>> {
        const SITE: CallSite = CallSite::new(CLASS, "get_assets_by_meaning");
        validate_guid(term_guid, "term_guid", &SITE)?;
        self.client.validate_paging(start_from, page_size, &SITE)?;

        let call = paged(ServiceCall::get(&["assets", "by-meaning", term_guid]), start_from, page_size).user(user_id);
        self.client.call_strings(SERVICE, "guids", call, &SITE).await
    }

    pub async fn get_meaning(&self, term_guid: &str, user_id: Option<&str>) -> Result<Value> {
        const SITE: CallSite = CallSite::new(CLASS, "get_meaning");
        validate_guid(term_guid, "term_guid", &SITE)?;

        let call = ServiceCall::get(&["meanings", term_guid]).user(user_id);
        self.client.call_field(SERVICE, "meaning", call, &SITE).await
    }

    /// Glossary terms whose name matches `term` exactly
    pub async fn get_meanings_by_name(
        &self,
        term: &str,
        start_from: i32,
        page_size: i32,
        user_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        const SITE: CallSite = CallSite::new(CLASS, "get_meanings_by_name");
        validate_name(term, "term", &SITE)?;
        self.client.validate_paging(start_from, page_size, &SITE)?;

        let call = paged(ServiceCall::post(&["meanings", "by-name"]), start_from, page_size)
            .body(name_body(term))
            .user(user_id);
        self.client.call_list(SERVICE, "meanings", call, &SITE).await
    }

    pub async fn find_meanings(
        &self,
        search_string: &str,
        start_from: i32,
        page_size: i32,
        user_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        const SITE: CallSite = CallSite::new(CLASS, "find_meanings");
        validate_search_string(search_string, "search_string", &SITE)?;
        self.client.validate_paging(start_from, page_size, &SITE)?;

        let call = paged(ServiceCall::post(&["meanings", "by-search-string"]), start_from, page_size)
            .body(search_string_body(search_string))
            .user(user_id);
        self.client.call_list(SERVICE, "meanings", call, &SITE).await
    }

    // -- Comments --

    /// Returns the guid of the new comment
    pub async fn add_comment_to_asset(
        &self,
        asset_guid: &str,
        comment_type: CommentType,
        comment_text: &str,
        is_public: bool,
        user_id: Option<&str>,
    ) -> Result<String> {
        const SITE: CallSite = CallSite::new(CLASS, "add_comment_to_asset");
        validate_guid(asset_guid, "asset_guid", &SITE)?;
        validate_text(comment_text, "comment_text", &SITE)?;

        let call = ServiceCall::post(&["assets", asset_guid, "comments"])
            .body(comment_body(comment_type, comment_text, is_public))
            .user(user_id);
        self.client.call_guid(SERVICE, call, &SITE).await
    }

    pub async fn update_comment(
        &self,
        asset_guid: &str,
        comment_guid: &str,
        comment_type: CommentType,
        comment_text: &str,
        is_public: bool,
        user_id: Option<&str>,
    ) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "update_comment");
        validate_guid(asset_guid, "asset_guid", &SITE)?;
        validate_guid(comment_guid, "comment_guid", &SITE)?;
        validate_text(comment_text, "comment_text", &SITE)?;

        let call = ServiceCall::post(&["assets", asset_guid, "comments", comment_guid, "update"])
            .body(comment_body(comment_type, comment_text, is_public))
            .user(user_id);
        self.client.call_unit(SERVICE, call, &SITE).await
    }

    pub async fn remove_comment(&self, asset_guid: &str, comment_guid: &str, user_id: Option<&str>) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "remove_comment");
        validate_guid(asset_guid, "asset_guid", &SITE)?;
        validate_guid(comment_guid, "comment_guid", &SITE)?;

        let call = ServiceCall::post(&["assets", asset_guid, "comments", comment_guid, "delete"]).user(user_id);
        self.client.call_unit(SERVICE, call, &SITE).await
    }

    /// Returns the guid of the reply
    pub async fn add_comment_reply(
        &self,
        asset_guid: &str,
        comment_guid: &str,
        comment_type: CommentType,
        comment_text: &str,
        is_public: bool,
        user_id: Option<&str>,
    ) -> Result<String> {
        const SITE: CallSite = CallSite::new(CLASS, "add_comment_reply");
        validate_guid(asset_guid, "asset_guid", &SITE)?;
        validate_guid(comment_guid, "comment_guid", &SITE)?;
        validate_text(comment_text, "comment_text", &SITE)?;

        let call = ServiceCall::post(&["assets", asset_guid, "comments", comment_guid, "replies"])
            .body(comment_body(comment_type, comment_text, is_public))
            .user(user_id);
        self.client.call_guid(SERVICE, call, &SITE).await
    }

    // -- Likes and ratings --

    pub async fn add_like(&self, asset_guid: &str, is_public: bool, user_id: Option<&str>) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "add_like");
        validate_guid(asset_guid, "asset_guid", &SITE)?;

        let call = ServiceCall::post(&["assets", asset_guid, "likes"])
            .body(feedback_body(is_public))
            .user(user_id);
        self.client.call_unit(SERVICE, call, &SITE).await
    }

    pub async fn remove_like(&self, asset_guid: &str, user_id: Option<&str>) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "remove_like");
        validate_guid(asset_guid, "asset_guid", &SITE)?;

        let call = ServiceCall::post(&["assets", asset_guid, "likes", "delete"]).user(user_id);
        self.client.call_unit(SERVICE, call, &SITE).await
    }

    /// Add or replace the caller's rating of an asset
    pub async fn add_rating(
        &self,
        asset_guid: &str,
        star_rating: StarRating,
        review: Option<&str>,
        is_public: bool,
        user_id: Option<&str>,
    ) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "add_rating");
        validate_guid(asset_guid, "asset_guid", &SITE)?;

        let call = ServiceCall::post(&["assets", asset_guid, "ratings"])
            .body(json!({
                "class": "RatingRequestBody",
                "starRating": star_rating,
                "review": review,
                "isPublic": is_public,
            }))
            .user(user_id);
        self.client.call_unit(SERVICE, call, &SITE).await
    }

    pub async fn remove_rating(&self, asset_guid: &str, user_id: Option<&str>) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "remove_rating");
        validate_guid(asset_guid, "asset_guid", &SITE)?;

        let call = ServiceCall::post(&["assets", asset_guid, "ratings", "delete"]).user(user_id);
        self.client.call_unit(SERVICE, call, &SITE).await
    }

    // -- Informal tags --

    /// Create a tag and return its guid.
    ///
    /// Private tags are only visible to the user that created them.
    pub async fn create_tag(
        &self,
        tag_name: &str,
        tag_description: Option<&str>,
        is_private: bool,
        user_id: Option<&str>,
    ) -> Result<String> {
        const SITE: CallSite = CallSite::new(CLASS, "create_tag");
        validate_name(tag_name, "tag_name", &SITE)?;

        let call = ServiceCall::post(&["tags"])
            .body(json!({
                "class": "TagRequestBody",
                "tagName": tag_name,
                "tagDescription": tag_description,
                "isPrivateTag": is_private,
            }))
            .user(user_id);
        self.client.call_guid(SERVICE, call, &SITE).await
    }

    pub async fn delete_tag(&self, tag_guid: &str, user_id: Option<&str>) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "delete_tag");
        validate_guid(tag_guid, "tag_guid", &SITE)?;

        let call = ServiceCall::post(&["tags", tag_guid, "delete"]).user(user_id);
        self.client.call_unit(SERVICE, call, &SITE).await
    }

    pub async fn update_tag_description(&self, tag_guid: &str, tag_description: &str, user_id: Option<&str>) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "update_tag_description");
        validate_guid(tag_guid, "tag_guid", &SITE)?;
        validate_text(tag_description, "tag_description", &SITE)?;

        let call = ServiceCall::post(&["tags", tag_guid, "update"])
            .body(json!({
                "class": "InformalTagUpdateRequestBody",
                "description": tag_description,
            }))
            .user(user_id);
        self.client.call_unit(SERVICE, call, &SITE).await
    }

    pub async fn get_tag(&self, tag_guid: &str, user_id: Option<&str>) -> Result<Value> {
        const SITE: CallSite = CallSite::new(CLASS, "get_tag");
        validate_guid(tag_guid, "tag_guid", &SITE)?;

        let call = ServiceCall::get(&["tags", tag_guid]).user(user_id);
        self.client.call_field(SERVICE, "tag", call, &SITE).await
    }

    /// Public tags with exactly this name
    pub async fn get_tags_by_name(
        &self,
        tag_name: &str,
        start_from: i32,
        page_size: i32,
        user_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        self.tags_by_name(CallSite::new(CLASS, "get_tags_by_name"), &["tags", "by-name"], tag_name, start_from, page_size, user_id)
            .await
    }

    /// The caller's private tags with exactly this name
    pub async fn get_my_tags_by_name(
        &self,
        tag_name: &str,
        start_from: i32,
        page_size: i32,
        user_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        self.tags_by_name(
            CallSite::new(CLASS, "get_my_tags_by_name"),
            &["tags", "private", "by-name"],
            tag_name,
            start_from,
            page_size,
            user_id,
        )
        .await
    }

    pub async fn find_tags(
        &self,
        search_string: &str,
        start_from: i32,
        page_size: i32,
        user_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        self.tags_by_search(
            CallSite::new(CLASS, "find_tags"),
            &["tags", "by-search-string"],
            search_string,
            start_from,
            page_size,
            user_id,
        )
        .await
    }

    pub async fn find_my_tags(
        &self,
        search_string: &str,
        start_from: i32,
        page_size: i32,
        user_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        self.tags_by_search(
            CallSite::new(CLASS, "find_my_tags"),
            &["tags", "private", "by-search-string"],
            search_string,
            start_from,
            page_size,
            user_id,
        )
        .await
    }

    /// Attach an existing tag to an asset
    pub async fn add_tag(&self, asset_guid: &str, tag_guid: &str, is_public: bool, user_id: Option<&str>) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "add_tag");
        validate_guid(asset_guid, "asset_guid", &SITE)?;
        validate_guid(tag_guid, "tag_guid", &SITE)?;

        let call = ServiceCall::post(&["assets", asset_guid, "tags", tag_guid])
            .body(feedback_body(is_public))
            .user(user_id);
        self.client.call_unit(SERVICE, call, &SITE).await
    }

    /// Attach an existing tag to an element (such as a schema attribute) within an asset
    pub async fn add_tag_to_element(
        &self,
        asset_guid: &str,
        element_guid: &str,
        tag_guid: &str,
        is_public: bool,
        user_id: Option<&str>,
    ) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "add_tag_to_element");
        validate_guid(asset_guid, "asset_guid", &SITE)?;
        validate_guid(element_guid, "element_guid", &SITE)?;
        validate_guid(tag_guid, "tag_guid", &SITE)?;

        let call = ServiceCall::post(&["assets", asset_guid, "elements", element_guid, "tags", tag_guid])
            .body(feedback_body(is_public))
            .user(user_id);
        self.client.call_unit(SERVICE, call, &SITE).await
    }

    pub async fn remove_tag(&self, asset_guid: &str, tag_guid: &str, user_id: Option<&str>) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "remove_tag");
        validate_guid(asset_guid, "asset_guid", &SITE)?;
        validate_guid(tag_guid, "tag_guid", &SITE)?;

        let call = ServiceCall::post(&["assets", asset_guid, "tags", tag_guid, "delete"]).user(user_id);
        self.client.call_unit(SERVICE, call, &SITE).await
    }

    pub async fn remove_tag_from_element(
        &self,
        asset_guid: &str,
        element_guid: &str,
        tag_guid: &str,
        user_id: Option<&str>,
    ) -> Result<()> {
        const SITE: CallSite = CallSite::new(CLASS, "remove_tag_from_element");
        validate_guid(asset_guid, "asset_guid", &SITE)?;
        validate_guid(element_guid, "element_guid", &SITE)?;
        validate_guid(tag_guid, "tag_guid", &SITE)?;

        let call = ServiceCall::post(&["assets", asset_guid, "elements", element_guid, "tags", tag_guid, "delete"])
            .user(user_id);
        self.client.call_unit(SERVICE, call, &SITE).await
    }

    /// Guids of assets carrying the tag
    pub async fn get_assets_by_tag(
        &self,
        tag_guid: &str,
        start_from: i32,
        page_size: i32,
        user_id: Option<&str>,
    ) -> Result<Vec<String>> {
        const SITE: CallSite = CallSite::new(CLASS, "get_assets_by_tag");
        validate_guid(tag_guid, "tag_guid", &SITE)?;
        self.client.validate_paging(start_from, page_size, &SITE)?;

        let call = paged(ServiceCall::get(&["assets", "by-tag", tag_guid]), start_from, page_size).user(user_id);
        self.client.call_strings(SERVICE, "guids", call, &SITE).await
    }

    async fn tags_by_name(
        &self,
        site: CallSite,
        path: &[&str],
        tag_name: &str,
        start_from: i32,
        page_size: i32,
        user_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        validate_name(tag_name, "tag_name", &site)?;
        self.client.validate_paging(start_from, page_size, &site)?;

        let call = paged(ServiceCall::post(path), start_from, page_size)
            .body(name_body(tag_name))
            .user(user_id);
        self.client.call_list(SERVICE, "tags", call, &site).await
    }

    async fn tags_by_search(
        &self,
        site: CallSite,
        path: &[&str],
        search_string: &str,
        start_from: i32,
        page_size: i32,
        user_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        validate_search_string(search_string, "search_string", &site)?;
        self.client.validate_paging(start_from, page_size, &site)?;

        let call = paged(ServiceCall::post(path), start_from, page_size)
            .body(search_string_body(search_string))
            .user(user_id);
        self.client.call_list(SERVICE, "tags", call, &site).await
    }
}

fn paged(call: ServiceCall<'_>, start_from: i32, page_size: i32) -> ServiceCall<'_> {
    call.query("startFrom", start_from).query("pageSize", page_size)
}

fn search_string_body(search_string: &str) -> Value {
    json!({ "class": "SearchStringRequestBody", "searchString": search_string })
}

fn name_body(name: &str) -> Value {
    json!({ "class": "NameRequestBody", "name": name })
}

fn feedback_body(is_public: bool) -> Value {
    json!({ "class": "FeedbackRequestBody", "isPublic": is_public })
}

fn comment_body(comment_type: CommentType, comment_text: &str, is_public: bool) -> Value {
    json!({
        "class": "CommentRequestBody",
        "commentType": comment_type,
        "commentText": comment_text,
        "isPublic": is_public,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EgeriaError;
    use crate::error_code::ErrorCode;
    use crate::testing::MockTransport;
    use crate::types::{HttpMethod, RawResponse};

    fn consumer(transport: &MockTransport) -> AssetConsumer<MockTransport> {
        let mut config = ClientConfig::new("https://localhost:9443", "cocoMDS2");
        config.user_id = Some("erinoverview".to_string());
        AssetConsumer::from_client(EgeriaClient::with_transport(config, transport.clone()).unwrap())
    }

    fn code(err: EgeriaError) -> ErrorCode {
        err.code().unwrap()
    }

    #[tokio::test]
    async fn test_empty_guid_is_rejected_locally() {
        let transport = MockTransport::new();
        let consumer = consumer(&transport);

        let err = consumer.add_like("", true, None).await.unwrap_err();
        assert_eq!(code(err), ErrorCode::NullGuid);

        let err = consumer.remove_comment("asset-1", "", None).await.unwrap_err();
        let detail = err.detail().unwrap();
        assert_eq!(detail.code, ErrorCode::NullGuid);
        assert!(detail.message.contains("comment_guid"));
        assert_eq!(detail.method_name, "remove_comment");

        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_paging_is_checked_before_dispatch() {
        let transport = MockTransport::new();
        let consumer = consumer(&transport);

        assert_eq!(code(consumer.find_assets("Coco.*", -1, 10, None).await.unwrap_err()), ErrorCode::NegativeStartFrom);
        assert_eq!(code(consumer.find_tags("pii", 0, -1, None).await.unwrap_err()), ErrorCode::NegativePageSize);
        assert_eq!(code(consumer.get_assets_by_tag("t1", 0, 101, None).await.unwrap_err()), ErrorCode::MaxPageSize);
        assert_eq!(code(consumer.find_meanings("", 0, 10, None).await.unwrap_err()), ErrorCode::NullSearchString);
        assert_eq!(code(consumer.create_tag(" ", None, false, None).await.unwrap_err()), ErrorCode::NullName);
        assert_eq!(code(consumer.update_tag_description("t1", "", None).await.unwrap_err()), ErrorCode::NullText);

        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_add_comment_request_shape() {
        let transport = MockTransport::new().with_response(RawResponse::new(
            200,
            r#"{"class":"GUIDResponse","relatedHTTPCode":200,"guid":"comment-1"}"#,
            "",
        ));
        let consumer = consumer(&transport);

        let guid = consumer
            .add_comment_to_asset("asset-1", CommentType::Suggestion, "Add lineage", true, Some("peterprofile"))
            .await
            .unwrap();
        assert_eq!(guid, "comment-1");

        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert!(request
            .endpoint
            .ends_with("/open-metadata/access-services/asset-consumer/users/peterprofile/assets/asset-1/comments"));
        assert_eq!(
            request.body,
            Some(json!({
                "class": "CommentRequestBody",
                "commentType": "SUGGESTION",
                "commentText": "Add lineage",
                "isPublic": true,
            }))
        );
    }

    #[tokio::test]
    async fn test_remove_like_sends_no_caller_body() {
        let transport = MockTransport::new();
        let consumer = consumer(&transport);

        consumer.remove_like("asset-1", None).await.unwrap();

        let request = &transport.requests()[0];
        assert!(request.endpoint.ends_with("/users/erinoverview/assets/asset-1/likes/delete"));
        assert_eq!(request.body, None);
    }

    #[tokio::test]
    async fn test_rating_body() {
        let transport = MockTransport::new();
        let consumer = consumer(&transport);

        consumer
            .add_rating("asset-1", StarRating::FourStars, Some("Useful"), false, None)
            .await
            .unwrap();

        assert_eq!(
            transport.requests()[0].body,
            Some(json!({
                "class": "RatingRequestBody",
                "starRating": "FOUR_STARS",
                "review": "Useful",
                "isPublic": false,
            }))
        );
    }

    #[tokio::test]
    async fn test_find_assets_returns_guids() {
        let transport = MockTransport::new().with_response(RawResponse::new(
            200,
            r#"{"relatedHTTPCode":200,"guids":["a1","a2"]}"#,
            "",
        ));
        let consumer = consumer(&transport);

        let guids = consumer.find_assets("Coco.*", 0, 50, None).await.unwrap();
        assert_eq!(guids, vec!["a1".to_string(), "a2".to_string()]);

        let request = &transport.requests()[0];
        assert!(request.endpoint.ends_with("/assets/by-search-string?startFrom=0&pageSize=50"));
        assert_eq!(
            request.body,
            Some(json!({"class": "SearchStringRequestBody", "searchString": "Coco.*"}))
        );
    }

    #[tokio::test]
    async fn test_missing_list_is_empty() {
        let transport = MockTransport::new();
        let consumer = consumer(&transport);

        assert!(consumer.get_my_tags_by_name("pii", 0, 0, None).await.unwrap().is_empty());
        assert!(transport.requests()[0].endpoint.contains("/tags/private/by-name?"));
    }

    #[tokio::test]
    async fn test_get_tag_without_element_is_unexpected() {
        let transport = MockTransport::new();
        let consumer = consumer(&transport);

        let err = consumer.get_tag("t1", None).await.unwrap_err();
        assert!(matches!(err, EgeriaError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn test_tag_on_element_path() {
        let transport = MockTransport::new();
        let consumer = consumer(&transport);

        consumer
            .remove_tag_from_element("asset-1", "column-7", "t1", None)
            .await
            .unwrap();

        assert!(transport.requests()[0]
            .endpoint
            .ends_with("/assets/asset-1/elements/column-7/tags/t1/delete"));
    }
}
