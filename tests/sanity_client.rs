use httpmock::prelude::*;
use kultur_rs::config::StoreConfig;
use kultur_rs::store::{ContentStore, Fetcher, Query, SanityClient, StoreError};
use serde_json::json;
use std::sync::Arc;

const ENDPOINT: &str = "/v2023-10-01/data/query/production";

fn store_config() -> StoreConfig {
    StoreConfig {
        project_id: "test".to_string(),
        ..StoreConfig::default()
    }
}

fn post_json(slug: &str) -> serde_json::Value {
    json!({
        "_id": "post-1",
        "_createdAt": "2024-01-15T10:30:00Z",
        "title": "Lumière du nord",
        "slug": {"current": slug},
        "publishedAt": "2024-01-15T10:30:00Z",
        "author": {"_id": "a1", "name": "Claire", "slug": {"current": "claire"}},
        "category": {"_id": "c1", "title": "Portraits", "slug": {"current": "portraits"}},
        "body": [
            {"_type": "block", "style": "normal", "children": [{"_type": "span", "text": "Bonjour"}]},
            {"_type": "youtube", "url": "https://example.com"}
        ]
    })
}

#[tokio::test]
async fn test_post_by_slug_sends_encoded_parameter() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(ENDPOINT)
                .query_param("$slug", "\"lumiere-du-nord\"")
                .query_param_exists("query");
            then.status(200)
                .json_body(json!({"ms": 3, "result": post_json("lumiere-du-nord")}));
        })
        .await;

    let client = SanityClient::with_base_url(&server.base_url(), &store_config(), None).unwrap();
    let fetcher = Fetcher::new(Arc::new(client));

    let post = fetcher.post("lumiere-du-nord").await.unwrap().unwrap();
    mock.assert_async().await;
    assert_eq!(post.summary.title, "Lumière du nord");
    assert_eq!(post.body.len(), 2);
}

#[tokio::test]
async fn test_null_result_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(ENDPOINT);
            then.status(200).json_body(json!({"ms": 1, "result": null}));
        })
        .await;

    let client = SanityClient::with_base_url(&server.base_url(), &store_config(), None).unwrap();
    let fetcher = Fetcher::new(Arc::new(client));

    assert!(fetcher.post("missing").await.unwrap().is_none());
    assert!(fetcher.page("about").await.unwrap().is_none());
}

#[tokio::test]
async fn test_error_status_is_a_store_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(ENDPOINT);
            then.status(500).body("boom");
        })
        .await;

    let client = SanityClient::with_base_url(&server.base_url(), &store_config(), None).unwrap();
    let fetcher = Fetcher::new(Arc::new(client));

    match fetcher.posts().await {
        Err(StoreError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_token_is_sent_as_bearer() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(ENDPOINT)
                .header("authorization", "Bearer secret");
            then.status(200).json_body(json!({"result": []}));
        })
        .await;

    let client = SanityClient::with_base_url(
        &server.base_url(),
        &store_config(),
        Some("secret".to_string()),
    )
    .unwrap();

    let result = client.query(&Query::AllCategories).await.unwrap();
    mock.assert_async().await;
    assert_eq!(result, json!([]));
}

#[tokio::test]
async fn test_invalid_body_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(ENDPOINT);
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let client = SanityClient::with_base_url(&server.base_url(), &store_config(), None).unwrap();
    let fetcher = Fetcher::new(Arc::new(client));

    assert!(matches!(
        fetcher.categories().await,
        Err(StoreError::Decode(_))
    ));
}
