//! kultur-rs: web front end for a photography culture magazine
//!
//! Articles, pages and categories live in a hosted content store and are
//! fetched on each request. Article bodies are portable-text documents
//! rendered to HTML and served through embedded Tera templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod image;
pub mod render;
pub mod server;
pub mod store;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The main application handle
#[derive(Clone)]
pub struct Kultur {
    /// Site configuration, environment overrides applied
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
}

impl Kultur {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self { config, base_dir })
    }

    /// The configured content store: a local dataset if set, the hosted API otherwise
    pub fn store(&self) -> Result<Arc<dyn store::ContentStore>> {
        match &self.config.store.local_dataset {
            Some(path) => Ok(Arc::new(store::MemoryStore::from_path(
                self.base_dir.join(path),
            )?)),
            None => Ok(Arc::new(store::SanityClient::new(&self.config.store)?)),
        }
    }

    /// Typed access to the configured store
    pub fn fetcher(&self) -> Result<store::Fetcher> {
        Ok(store::Fetcher::new(self.store()?))
    }

    /// Image URL resolver for the configured project
    pub fn images(&self) -> image::CdnImages {
        image::CdnImages::from_config(&self.config.store)
    }

    /// Directory served under `/static`
    pub fn static_dir(&self) -> PathBuf {
        self.base_dir.join(&self.config.server.static_dir)
    }
}
