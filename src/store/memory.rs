//! In-process store over a local dataset export
//!
//! Answers the fixed query set against documents loaded from an export file
//! (NDJSON, one document per line, or a JSON array). References to authors and
//! categories are expanded the way the remote projections do. Draft documents
//! (`drafts.` ids) are never returned.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::{ContentStore, Query, StoreError};

/// Documents held in memory, keyed by `_id`
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Vec<Value>,
    index: HashMap<String, usize>,
}

impl MemoryStore {
    /// Build a store from already parsed documents
    pub fn new(documents: Vec<Value>) -> Self {
        let documents: Vec<Value> = documents
            .into_iter()
            .filter(|doc| !doc_id(doc).is_some_and(|id| id.starts_with("drafts.")))
            .collect();
        let index = documents
            .iter()
            .enumerate()
            .filter_map(|(i, doc)| doc_id(doc).map(|id| (id.to_string(), i)))
            .collect();
        Self { documents, index }
    }

    /// Load an export file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let store = Self::parse(&content)?;
        tracing::info!(
            "Loaded {} documents from {:?}",
            store.documents.len(),
            path
        );
        Ok(store)
    }

    /// Parse a JSON array or NDJSON export
    pub fn parse(content: &str) -> Result<Self, StoreError> {
        let trimmed = content.trim_start();
        let documents = if trimmed.starts_with('[') {
            serde_json::from_str::<Vec<Value>>(trimmed)?
        } else {
            trimmed
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(n, line)| {
                    serde_json::from_str(line)
                        .map_err(|e| StoreError::Dataset(format!("line {}: {}", n + 1, e)))
                })
                .collect::<Result<Vec<Value>, _>>()?
        };
        Ok(Self::new(documents))
    }

    /// Number of published documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn of_type(&self, kind: &'static str) -> impl Iterator<Item = &Value> + '_ {
        self.documents
            .iter()
            .filter(move |doc| doc.get("_type").and_then(Value::as_str) == Some(kind))
    }

    fn by_slug(&self, kind: &'static str, slug: &str) -> Option<&Value> {
        self.of_type(kind)
            .find(|doc| doc.pointer("/slug/current").and_then(Value::as_str) == Some(slug))
    }

    fn dereference(&self, value: &Value) -> Value {
        value
            .get("_ref")
            .and_then(Value::as_str)
            .and_then(|id| self.index.get(id))
            .map(|&i| self.documents[i].clone())
            .unwrap_or(Value::Null)
    }

    /// Copy a document with its author/category references expanded
    fn expand(&self, doc: &Value) -> Value {
        let mut expanded: Map<String, Value> = doc.as_object().cloned().unwrap_or_default();
        for field in ["author", "category"] {
            if let Some(reference) = expanded.get(field) {
                let target = self.dereference(reference);
                expanded.insert(field.to_string(), target);
            }
        }
        Value::Object(expanded)
    }

    fn published_at(doc: &Value) -> Option<DateTime<Utc>> {
        let raw = doc.get("publishedAt")?.as_str()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|d| d.with_timezone(&Utc))
            .ok()
    }
}

fn doc_id(doc: &Value) -> Option<&str> {
    doc.get("_id").and_then(Value::as_str)
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn query(&self, query: &Query) -> Result<Value, StoreError> {
        let result = match query {
            Query::AllPosts => {
                // defined(publishedAt); unparseable dates sort last
                let mut posts: Vec<(Option<DateTime<Utc>>, &Value)> = self
                    .of_type("post")
                    .filter(|doc| doc.get("publishedAt").is_some_and(|v| !v.is_null()))
                    .map(|doc| (Self::published_at(doc), doc))
                    .collect();
                posts.sort_by(|a, b| b.0.cmp(&a.0));
                Value::Array(posts.into_iter().map(|(_, doc)| self.expand(doc)).collect())
            }
            Query::PostBySlug(slug) => self
                .by_slug("post", slug)
                .map(|doc| self.expand(doc))
                .unwrap_or(Value::Null),
            Query::PageBySlug(slug) => self.by_slug("page", slug).cloned().unwrap_or(Value::Null),
            Query::AllCategories => {
                let mut categories: Vec<&Value> = self.of_type("category").collect();
                categories.sort_by_key(|doc| {
                    doc.get("title")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string()
                });
                Value::Array(categories.into_iter().cloned().collect())
            }
        };
        Ok(result)
    }
}
