mod common;

use common::*;
use egeria_client::{AssetConsumer, CommentType, EgeriaError, ErrorCode, StarRating};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn consumer(server: &MockServer) -> AssetConsumer {
    AssetConsumer::from_client(client_for(server))
}

#[tokio::test]
async fn test_find_meanings_sends_paging_and_search_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(service_path("asset-consumer", USER, "meanings/by-search-string")))
        .and(query_param("startFrom", "20"))
        .and(query_param("pageSize", "10"))
        .and(body_json(json!({ "class": "SearchStringRequestBody", "searchString": "Cust.*" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "meanings": [
                { "elementHeader": { "guid": "t1" } },
                { "elementHeader": { "guid": "t2" } }
            ]
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let meanings = consumer(&server).find_meanings("Cust.*", 20, 10, None).await.unwrap();

    assert_eq!(meanings.len(), 2);
    assert_eq!(meanings[1]["elementHeader"]["guid"], "t2");
}

#[tokio::test]
async fn test_missing_list_field_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({}))))
        .mount(&server)
        .await;

    let tags = consumer(&server).find_tags("nothing.*", 0, 0, None).await.unwrap();
    assert!(tags.is_empty());
}

#[tokio::test]
async fn test_page_size_over_maximum_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({}))))
        .expect(0)
        .mount(&server)
        .await;

    let err = consumer(&server).find_assets("Week.*", 0, 1000, None).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::MaxPageSize));
}

#[tokio::test]
async fn test_comment_returns_new_guid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(service_path("asset-consumer", USER, "assets/asset-1/comments")))
        .and(body_json(json!({
            "class": "CommentRequestBody",
            "commentType": "SUGGESTION",
            "commentText": "Add a data quality score",
            "isPublic": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({ "guid": "c-42" }))))
        .mount(&server)
        .await;

    let guid = consumer(&server)
        .add_comment_to_asset("asset-1", CommentType::Suggestion, "Add a data quality score", true, None)
        .await
        .unwrap();

    assert_eq!(guid, "c-42");
}

#[tokio::test]
async fn test_rating_rejected_by_platform() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(service_path("asset-consumer", USER, "assets/asset-1/ratings")))
        .respond_with(ResponseTemplate::new(200).set_body_json(failed_envelope(400, "asset asset-1 is not visible")))
        .mount(&server)
        .await;

    let err = consumer(&server)
        .add_rating("asset-1", StarRating::FourStars, Some("solid"), false, None)
        .await
        .unwrap_err();

    assert!(matches!(err, EgeriaError::ApplicationFailure(_)));
    assert_eq!(err.related_http_code(), Some(400));
}

#[tokio::test]
async fn test_tag_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(service_path("asset-consumer", USER, "tags")))
        .and(body_json(json!({
            "class": "TagRequestBody",
            "tagName": "quarterly",
            "tagDescription": null,
            "isPrivateTag": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({ "guid": "tag-7" }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(service_path("asset-consumer", USER, "assets/asset-1/tags/tag-7")))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({}))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(service_path("asset-consumer", USER, "tags/tag-7/delete")))
        .and(body_json(json!({ "class": "NullRequestBody" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    let consumer = consumer(&server);
    let tag = consumer.create_tag("quarterly", None, false, None).await.unwrap();
    consumer.add_tag("asset-1", &tag, true, None).await.unwrap();
    consumer.delete_tag(&tag, None).await.unwrap();
}
