//! Content module - articles, pages and their rich-text bodies

mod image;
mod portable;
mod post;
pub mod validate;

pub use image::{AssetId, Image, ImageRef, ImageSize};
pub use portable::{Carousel, ListItem, ListStyle, Mark, Node, Span, TextBlock, TextStyle};
pub use post::{Author, Category, Page, Post, PostSummary, ResolvedSeo, Seo, Slug};
