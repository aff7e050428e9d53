//! Image URL resolution for the media CDN

use crate::config::StoreConfig;
use crate::content::{Image, ImageRef};

/// Thumbnail in the article list
pub const THUMBNAIL: (u32, u32) = (120, 80);
/// Article hero image
pub const HERO: (u32, u32) = (1200, 675);
/// Inline body image
pub const BODY: (u32, u32) = (800, 600);
/// Carousel and gallery tiles
pub const TILE: (u32, u32) = (400, 300);
/// Author avatar
pub const AVATAR: (u32, u32) = (80, 80);
/// Open Graph preview
pub const SOCIAL: (u32, u32) = (1200, 630);

/// Turns an image reference into a fetchable URL
pub trait ImageResolver: Send + Sync {
    /// URL for the image, optionally resized to `(width, height)`
    fn url(&self, image: &ImageRef, size: Option<(u32, u32)>) -> String;

    /// Convenience for an [`Image`] value
    fn image_url(&self, image: &Image, size: (u32, u32)) -> String {
        self.url(&image.asset, Some(size))
    }
}

/// Resolver for the store's image CDN
#[derive(Debug, Clone)]
pub struct CdnImages {
    base: String,
    project_id: String,
    dataset: String,
}

impl CdnImages {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            base: "https://cdn.sanity.io".to_string(),
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.project_id, &config.dataset)
    }
}

impl ImageResolver for CdnImages {
    fn url(&self, image: &ImageRef, size: Option<(u32, u32)>) -> String {
        let base = match image {
            ImageRef::Asset(asset) => format!(
                "{}/images/{}/{}/{}",
                self.base,
                self.project_id,
                self.dataset,
                asset.file_name()
            ),
            ImageRef::Url(url) => url.clone(),
        };

        match size {
            Some((w, h)) => {
                let sep = if base.contains('?') { '&' } else { '?' };
                format!("{}{}w={}&h={}", base, sep, w, h)
            }
            None => base,
        }
    }
}
