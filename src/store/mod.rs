//! Content store access
//!
//! Pages read the content store through a fixed set of queries ([`Query`]).
//! A [`ContentStore`] answers a query with the raw JSON result; [`Fetcher`]
//! turns that into typed records. A single-record query that matches nothing
//! yields `Ok(None)`, which is distinct from every [`StoreError`].

mod memory;
mod sanity;

pub use memory::MemoryStore;
pub use sanity::SanityClient;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::content::{Category, Page, Post, PostSummary};

const ALL_POSTS: &str = r#"*[_type == "post" && defined(publishedAt)] | order(publishedAt desc) {
  _id,
  _createdAt,
  title,
  slug,
  excerpt,
  mainImage,
  publishedAt,
  readingTime,
  author->{_id, name, slug},
  category->{_id, title, slug}
}"#;

const POST_BY_SLUG: &str = r#"*[_type == "post" && slug.current == $slug][0] {
  _id,
  _createdAt,
  title,
  slug,
  excerpt,
  mainImage,
  publishedAt,
  readingTime,
  body,
  gallery,
  seo,
  author->{_id, name, slug, bio, image},
  category->{_id, title, slug}
}"#;

const PAGE_BY_SLUG: &str = r#"*[_type == "page" && slug.current == $slug][0] {
  _id,
  title,
  slug,
  content,
  seo
}"#;

const ALL_CATEGORIES: &str = r#"*[_type == "category"] | order(title asc) {
  _id,
  title,
  slug,
  description
}"#;

/// The read queries pages may issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// All published articles, newest first
    AllPosts,
    /// One article by slug
    PostBySlug(String),
    /// One page by slug
    PageBySlug(String),
    /// All categories, ordered by title
    AllCategories,
}

impl Query {
    /// GROQ text sent to the store
    pub fn groq(&self) -> &'static str {
        match self {
            Query::AllPosts => ALL_POSTS,
            Query::PostBySlug(_) => POST_BY_SLUG,
            Query::PageBySlug(_) => PAGE_BY_SLUG,
            Query::AllCategories => ALL_CATEGORIES,
        }
    }

    /// Bound parameters, without the `$` prefix
    pub fn params(&self) -> Vec<(&'static str, Value)> {
        match self {
            Query::PostBySlug(slug) | Query::PageBySlug(slug) => {
                vec![("slug", Value::String(slug.clone()))]
            }
            Query::AllPosts | Query::AllCategories => Vec::new(),
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Query::AllPosts => "all-posts",
            Query::PostBySlug(_) => "post-by-slug",
            Query::PageBySlug(_) => "page-by-slug",
            Query::AllCategories => "all-categories",
        }
    }
}

/// Failure to obtain an answer from the content store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Content store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Content store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected content store response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Local dataset error: {0}")]
    Dataset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A queryable document store
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Run a query and return its raw `result` value
    async fn query(&self, query: &Query) -> Result<Value, StoreError>;
}

/// Typed access on top of a [`ContentStore`]
#[derive(Clone)]
pub struct Fetcher {
    store: Arc<dyn ContentStore>,
}

impl Fetcher {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// All published articles, newest first
    pub async fn posts(&self) -> Result<Vec<PostSummary>, StoreError> {
        self.many(&Query::AllPosts).await
    }

    /// One article, or `None` when no article has this slug
    pub async fn post(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        let post: Option<Post> = self.one(&Query::PostBySlug(slug.to_string())).await?;
        Ok(post.filter(|p| p.summary.slug.as_str() == slug))
    }

    /// One page, or `None` when no page has this slug
    pub async fn page(&self, slug: &str) -> Result<Option<Page>, StoreError> {
        let page: Option<Page> = self.one(&Query::PageBySlug(slug.to_string())).await?;
        Ok(page.filter(|p| p.slug.as_str() == slug))
    }

    /// All categories, ordered by title
    pub async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        self.many(&Query::AllCategories).await
    }

    async fn one<T: DeserializeOwned>(&self, query: &Query) -> Result<Option<T>, StoreError> {
        let value = self.run(query).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn many<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, StoreError> {
        let value = self.run(query).await?;
        let records: Option<Vec<T>> = serde_json::from_value(value)?;
        Ok(records.unwrap_or_default())
    }

    async fn run(&self, query: &Query) -> Result<Value, StoreError> {
        let start = std::time::Instant::now();
        let result = self.store.query(query).await;
        match &result {
            Ok(_) => tracing::debug!("Query {} answered in {:?}", query.name(), start.elapsed()),
            Err(e) => tracing::warn!("Query {} failed: {}", query.name(), e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Fixed(Value);

    #[async_trait]
    impl ContentStore for Fixed {
        async fn query(&self, _query: &Query) -> Result<Value, StoreError> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    #[async_trait]
    impl ContentStore for Failing {
        async fn query(&self, _query: &Query) -> Result<Value, StoreError> {
            Err(StoreError::Status {
                status: 503,
                body: "unavailable".into(),
            })
        }
    }

    fn fetcher(store: impl ContentStore + 'static) -> Fetcher {
        Fetcher::new(Arc::new(store))
    }

    #[test]
    fn test_query_params() {
        assert!(Query::AllPosts.params().is_empty());
        assert_eq!(
            Query::PostBySlug("a-b".into()).params(),
            vec![("slug", json!("a-b"))]
        );
        assert!(Query::PostBySlug("x".into()).groq().contains("$slug"));
        assert!(Query::AllCategories.groq().contains("order(title asc)"));
    }

    #[tokio::test]
    async fn test_null_result_is_not_found() {
        let fetcher = fetcher(Fixed(Value::Null));
        assert_eq!(fetcher.post("missing").await.unwrap(), None);
        assert_eq!(fetcher.page("missing").await.unwrap(), None);
        assert!(fetcher.posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_an_error() {
        let fetcher = fetcher(Failing);
        let err = fetcher.post("any").await.unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_malformed_record_is_a_decode_error() {
        let fetcher = fetcher(Fixed(json!({"_id": "p", "title": 3})));
        let err = fetcher.page("p").await.unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    fn summary_json(slug: &str) -> Value {
        json!({
            "_id": format!("post-{}", slug),
            "_createdAt": "2024-01-15T10:30:00Z",
            "title": slug,
            "slug": {"current": slug},
            "excerpt": null,
            "mainImage": null,
            "publishedAt": "2024-01-15T10:30:00Z",
            "readingTime": null,
            "author": {"_id": "a1", "name": "Claire", "slug": {"current": "claire"}},
            "category": {"_id": "c1", "title": "Portraits", "slug": {"current": "portraits"}}
        })
    }

    #[tokio::test]
    async fn test_list_survives_edge_case_optional_fields() {
        let mut odd = summary_json("odd");
        odd["readingTime"] = json!(7.5);
        odd["mainImage"] = json!({"_type": "image", "alt": "x"});
        let fetcher = fetcher(Fixed(json!([summary_json("plain"), odd])));

        let posts = fetcher.posts().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].excerpt, None);
        assert_eq!(posts[0].reading_time, None);
        assert_eq!(posts[1].reading_time, Some(7.5));
        assert_eq!(posts[1].main_image, None);
    }

    #[tokio::test]
    async fn test_post_with_nulls_and_assetless_gallery() {
        let mut post = summary_json("t");
        post["body"] = Value::Null;
        post["seo"] = Value::Null;
        post["gallery"] = json!([{"_type": "image", "_key": "g1", "alt": "x"}]);
        post["author"]["image"] = json!({"_type": "image"});
        let fetcher = fetcher(Fixed(post));

        let post = fetcher.post("t").await.unwrap().unwrap();
        assert!(post.body.is_empty());
        assert!(post.gallery.is_empty());
        assert_eq!(post.seo, None);
        assert_eq!(post.summary.author.image, None);
    }

    #[tokio::test]
    async fn test_slug_mismatch_is_not_found() {
        let fetcher = fetcher(Fixed(json!({
            "_id": "page-1",
            "title": "About",
            "slug": {"current": "about"},
            "content": []
        })));
        assert!(fetcher.page("about").await.unwrap().is_some());
        assert!(fetcher.page("contact").await.unwrap().is_none());
    }
}
