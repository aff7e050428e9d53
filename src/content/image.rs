//! Image references as stored by the content store

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

lazy_static! {
    static ref ASSET_REF: Regex =
        Regex::new(r"^image-([A-Za-z0-9]+)-(\d+)x(\d+)-([a-z0-9]+)$").expect("valid asset regex");
}

/// A parsed image asset id: `image-<id>-<width>x<height>-<format>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetId {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

impl AssetId {
    /// Parse an asset reference string
    pub fn parse(reference: &str) -> Option<Self> {
        let caps = ASSET_REF.captures(reference)?;
        Some(Self {
            id: caps[1].to_string(),
            width: caps[2].parse().ok()?,
            height: caps[3].parse().ok()?,
            format: caps[4].to_string(),
        })
    }

    /// File name on the image CDN
    pub fn file_name(&self) -> String {
        format!("{}-{}x{}.{}", self.id, self.width, self.height, self.format)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "image-{}-{}x{}-{}",
            self.id, self.width, self.height, self.format
        )
    }
}

/// Where the bytes of an image live
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawAsset")]
pub enum ImageRef {
    /// Asset hosted on the image CDN
    Asset(AssetId),
    /// Asset that was dereferenced to a direct URL
    Url(String),
}

#[derive(Deserialize)]
struct RawAsset {
    #[serde(rename = "_ref")]
    reference: Option<String>,
    #[serde(rename = "_id")]
    id: Option<String>,
    url: Option<String>,
}

impl TryFrom<RawAsset> for ImageRef {
    type Error = String;

    fn try_from(raw: RawAsset) -> Result<Self, Self::Error> {
        if let Some(url) = raw.url {
            return Ok(ImageRef::Url(url));
        }
        let reference = raw
            .reference
            .or(raw.id)
            .ok_or_else(|| "image asset has neither _ref, _id nor url".to_string())?;
        AssetId::parse(&reference)
            .map(ImageRef::Asset)
            .ok_or_else(|| format!("malformed image asset reference: {}", reference))
    }
}

/// Display size requested by the author for an inline image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    Small,
    Medium,
    #[default]
    Large,
    Full,
}

impl ImageSize {
    /// CSS class name for this size
    pub fn class(self) -> &'static str {
        match self {
            ImageSize::Small => "size-small",
            ImageSize::Medium => "size-medium",
            ImageSize::Large => "size-large",
            ImageSize::Full => "size-full",
        }
    }
}

/// An image with its editorial metadata
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Image {
    pub asset: ImageRef,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    size: Option<String>,
}

impl Image {
    /// Build an image without metadata
    pub fn new(asset: ImageRef) -> Self {
        Self {
            asset,
            alt: None,
            caption: None,
            size: None,
        }
    }

    /// Display size; unknown or missing values fall back to large
    pub fn size(&self) -> ImageSize {
        match self.size.as_deref() {
            Some("small") => ImageSize::Small,
            Some("medium") => ImageSize::Medium,
            Some("full") => ImageSize::Full,
            _ => ImageSize::Large,
        }
    }

    /// Alt text, empty when the author left it out
    pub fn alt_text(&self) -> &str {
        self.alt.as_deref().unwrap_or("")
    }
}

impl Image {
    /// Decode an image, `None` when it has no usable asset
    pub fn from_value(value: Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }
        match serde_json::from_value::<Image>(value) {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::debug!("Skipping unusable image: {}", e);
                None
            }
        }
    }
}

/// Optional image field; an image without a usable asset reads as absent
pub(crate) fn optional_image<'de, D>(deserializer: D) -> Result<Option<Image>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Image::from_value(Value::deserialize(deserializer)?))
}

/// Image list; `null` is empty and unusable entries are skipped
pub(crate) fn image_list<'de, D>(deserializer: D) -> Result<Vec<Image>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(images_from_values(values))
}

pub(crate) fn images_from_values(values: Vec<Value>) -> Vec<Image> {
    values.into_iter().filter_map(Image::from_value).collect()
}
