use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use kultur_rs::config::SiteConfig;
use kultur_rs::server::{router, AppState};
use kultur_rs::store::{ContentStore, MemoryStore, Query, StoreError};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn documents() -> Vec<Value> {
    vec![
        json!({"_id": "a1", "_type": "author", "name": "Claire Martin", "slug": {"current": "claire"}, "bio": "Photographe."}),
        json!({"_id": "c1", "_type": "category", "title": "Long read", "slug": {"current": "long-read"}}),
        json!({
            "_id": "p1",
            "_type": "post",
            "_createdAt": "2024-01-10T08:00:00Z",
            "title": "Lumière du nord",
            "slug": {"current": "lumiere-du-nord"},
            "excerpt": "Un voyage en Islande.",
            "publishedAt": "2024-01-15T10:30:00Z",
            "readingTime": 7,
            "mainImage": {"asset": {"_ref": "image-abc123-1200x800-jpg"}, "alt": "Lac"},
            "author": {"_ref": "a1"},
            "category": {"_ref": "c1"},
            "body": [
                {
                    "_type": "block",
                    "style": "normal",
                    "markDefs": [{"_key": "l1", "_type": "link", "href": "https://example.com", "blank": true}],
                    "children": [
                        {"_type": "span", "text": "Bonjour ", "marks": []},
                        {"_type": "span", "text": "monde", "marks": ["strong", "l1"]}
                    ]
                },
                {"_type": "mysteryEmbed", "payload": "ignored"},
                {"_type": "block", "style": "h2", "children": [{"_type": "span", "text": "Suite"}]}
            ]
        }),
        json!({
            "_id": "p2",
            "_type": "post",
            "_createdAt": "2024-03-01T08:00:00Z",
            "title": "Portraits de rue",
            "slug": {"current": "portraits-de-rue"},
            "publishedAt": "2024-03-01T08:00:00Z",
            "author": {"_ref": "a1"},
            "category": {"_ref": "c1"},
            "body": []
        }),
    ]
}

fn app_with(store: Arc<dyn ContentStore>) -> Router {
    let mut config = SiteConfig::default();
    config.store.project_id = "proj".to_string();
    let static_dir = std::env::temp_dir();
    let state = AppState::new(config, store, static_dir).unwrap();
    router(Arc::new(state))
}

fn app(documents: Vec<Value>) -> Router {
    app_with(Arc::new(MemoryStore::new(documents)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

struct Unavailable;

#[async_trait::async_trait]
impl ContentStore for Unavailable {
    async fn query(&self, _query: &Query) -> Result<Value, StoreError> {
        Err(StoreError::Status {
            status: 503,
            body: "down".to_string(),
        })
    }
}

#[tokio::test]
async fn test_index_lists_posts_newest_first() {
    let (status, html) = get(app(documents()), "/").await;
    assert_eq!(status, StatusCode::OK);

    let newer = html.find("Portraits de rue").unwrap();
    let older = html.find("Lumière du nord").unwrap();
    assert!(newer < older);
    assert!(html.contains("01"));
    assert!(html.contains("15 janvier 2024"));
    assert!(html.contains("Claire Martin"));
    assert!(html.contains("abc123-1200x800.jpg?w=120&amp;h=80"));
}

#[tokio::test]
async fn test_blog_alias_and_empty_store() {
    let (status, html) = get(app(Vec::new()), "/blog").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Aucun article n'est encore publié."));
}

#[tokio::test]
async fn test_post_page_renders_body() {
    let (status, html) = get(app(documents()), "/blog/lumiere-du-nord").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(
        r#"<p>Bonjour <strong><a href="https://example.com" target="_blank" rel="noopener noreferrer">monde</a></strong></p>"#
    ));
    assert!(html.contains("<h2>Suite</h2>"));
    assert!(!html.contains("ignored"));
    assert!(html.contains("7 min de lecture"));
    assert!(html.contains("Photographe."));
    assert!(html.contains(r#"<meta property="og:type" content="article">"#));
}

#[tokio::test]
async fn test_fractional_reading_time_and_assetless_images() {
    let mut docs = documents();
    docs[2]["readingTime"] = json!(7.5);
    docs[2]["gallery"] = json!([{"_type": "image", "_key": "g1", "alt": "x"}]);
    docs[3]["mainImage"] = json!({"_type": "image", "alt": "x"});

    let (status, html) = get(app(docs.clone()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Portraits de rue"));

    let (status, html) = get(app(docs), "/blog/lumiere-du-nord").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("7.5 min de lecture"));
    assert!(!html.contains("Galerie"));
}

#[tokio::test]
async fn test_unknown_slug_is_404() {
    let (status, html) = get(app(documents()), "/blog/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Article non trouvé"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _) = get(app(documents()), "/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_failure_is_500() {
    let (status, html) = get(app_with(Arc::new(Unavailable)), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(html.contains("Erreur"));
}

#[tokio::test]
async fn test_static_pages_without_store_pages() {
    let (status, html) = get(app(documents()), "/about").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("À propos"));

    let (status, html) = get(app(documents()), "/contact").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("contact@kulturphotoclub.com"));
}

#[tokio::test]
async fn test_about_survives_store_failure() {
    let (status, html) = get(app_with(Arc::new(Unavailable)), "/about").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("À propos"));
}

#[tokio::test]
async fn test_store_page_overrides_about() {
    let mut docs = documents();
    docs.push(json!({
        "_id": "page-about",
        "_type": "page",
        "title": "Qui sommes-nous",
        "slug": {"current": "about"},
        "content": [{"_type": "block", "style": "normal", "children": [{"_type": "span", "text": "Texte géré"}]}]
    }));
    let (status, html) = get(app(docs), "/about").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Qui sommes-nous"));
    assert!(html.contains("<p>Texte géré</p>"));
}

#[tokio::test]
async fn test_categories_page() {
    let (status, html) = get(app(documents()), "/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Long read"));
}
