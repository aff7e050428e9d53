//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    /// Locale used for long-form dates, e.g. `fr_FR`
    pub locale: String,
    /// IANA time zone name used for displayed dates
    pub timezone: String,
    pub contact_email: String,

    // URL
    pub url: String,
    pub root: String,

    // Content store
    pub store: StoreConfig,

    // Server
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Kultur Photo Club".to_string(),
            subtitle: "Magazine Culture Photo".to_string(),
            description: "Un magazine culture photo avec des articles de fond, des portraits \
                          éditoriaux de photographes, et des recommandations mensuelles."
                .to_string(),
            author: "Kultur Photo Club".to_string(),
            language: "fr".to_string(),
            locale: "fr_FR".to_string(),
            timezone: "Europe/Paris".to_string(),
            contact_email: "contact@kulturphotoclub.com".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            store: StoreConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply `SANITY_*` environment overrides on top of the file values
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = &mut self.store;
        if let Some(v) = lookup("SANITY_PROJECT_ID") {
            store.project_id = v;
        }
        if let Some(v) = lookup("SANITY_DATASET") {
            store.dataset = v;
        }
        if let Some(v) = lookup("SANITY_API_VERSION") {
            store.api_version = v;
        }
        if let Some(v) = lookup("SANITY_API_TOKEN") {
            store.token = Some(v).filter(|t| !t.is_empty());
        }
        if let Some(v) = lookup("SANITY_USE_CDN") {
            store.use_cdn = matches!(v.as_str(), "1" | "true" | "yes");
        }
        tracing::debug!(
            "Store config: project={:?} dataset={:?} cdn={}",
            store.project_id,
            store.dataset,
            store.use_cdn
        );
    }
}

/// Remote content store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub project_id: String,
    pub dataset: String,
    /// Dated API version, e.g. `2023-10-01`
    pub api_version: String,
    pub use_cdn: bool,
    pub token: Option<String>,
    /// Read documents from a local export instead of the remote API
    pub local_dataset: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2023-10-01".to_string(),
            use_cdn: true,
            token: None,
            local_dataset: None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
            static_dir: "static".to_string(),
        }
    }
}
