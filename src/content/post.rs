//! Article, author, category and page records

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::image::{image_list, optional_image, Image};
use super::portable::Node;

/// A URL-safe unique identifier, stored as `{ "current": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Slug {
    pub current: String,
}

impl Slug {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.current
    }
}

/// Search-engine overrides set by the author
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
}

/// Title and description actually used in the document head
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSeo {
    pub title: String,
    pub description: Option<String>,
}

impl Seo {
    /// Pick override values, falling back to the record's own title and excerpt
    pub fn resolve(seo: Option<&Seo>, title: &str, excerpt: Option<&str>) -> ResolvedSeo {
        let title = seo
            .and_then(|s| non_empty(&s.meta_title))
            .unwrap_or(title)
            .to_string();
        let description = seo
            .and_then(|s| non_empty(&s.meta_description))
            .or(excerpt)
            .map(str::to_string);
        ResolvedSeo { title, description }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Article author
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Author {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub slug: Slug,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "optional_image")]
    pub image: Option<Image>,
}

/// Article category
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub description: Option<String>,
}

/// An article as shown in the list view (no body)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdAt")]
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "optional_image")]
    pub main_image: Option<Image>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Minutes; the schema allows fractional values
    #[serde(default)]
    pub reading_time: Option<f64>,
    pub author: Author,
    pub category: Category,
}

/// A full article
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(flatten)]
    pub summary: PostSummary,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: Vec<Node>,
    #[serde(default, deserialize_with = "image_list")]
    pub gallery: Vec<Image>,
    #[serde(default)]
    pub seo: Option<Seo>,
}

impl Post {
    /// Date shown to readers: publication date, else creation date
    pub fn display_date(&self) -> DateTime<Utc> {
        self.summary.display_date()
    }

    pub fn seo(&self) -> ResolvedSeo {
        Seo::resolve(
            self.seo.as_ref(),
            &self.summary.title,
            self.summary.excerpt.as_deref(),
        )
    }
}

impl PostSummary {
    /// Date shown to readers: publication date, else creation date
    pub fn display_date(&self) -> DateTime<Utc> {
        self.published_at.unwrap_or(self.created_at)
    }
}

/// A standalone page
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: Vec<Node>,
    #[serde(default)]
    pub seo: Option<Seo>,
}

impl Page {
    pub fn seo(&self) -> ResolvedSeo {
        Seo::resolve(self.seo.as_ref(), &self.title, None)
    }
}

/// Projections return `null` for absent arrays
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
