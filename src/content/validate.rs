//! Authoring bounds checks
//!
//! The studio enforces these limits when content is written. The renderer
//! never rejects a record over them; `check` uses this module to report
//! documents that slipped through (imports, schema changes, API writes).

use super::portable::Node;
use super::post::{Post, Seo};

pub const MAX_TITLE: usize = 120;
pub const MAX_EXCERPT: usize = 200;
pub const READING_TIME: (u32, u32) = (1, 60);
pub const MAX_SEO_TITLE: usize = 60;
pub const MAX_SEO_DESCRIPTION: usize = 160;
pub const CAROUSEL_IMAGES: (usize, usize) = (2, 10);

/// A single bound violated by a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub slug: String,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.slug, self.field, self.message)
    }
}

struct Report<'a> {
    slug: &'a str,
    violations: Vec<Violation>,
}

impl Report<'_> {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation {
            slug: self.slug.to_string(),
            field: field.into(),
            message: message.into(),
        });
    }

    fn max_len(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(value) = value {
            let len = value.chars().count();
            if len > max {
                self.push(field, format!("{} characters, at most {} allowed", len, max));
            }
        }
    }
}

/// Check a post against the authoring bounds
pub fn validate_post(post: &Post) -> Vec<Violation> {
    let summary = &post.summary;
    let mut report = Report {
        slug: summary.slug.as_str(),
        violations: Vec::new(),
    };

    if summary.title.trim().is_empty() {
        report.push("title", "required");
    }
    report.max_len("title", Some(&summary.title), MAX_TITLE);
    report.max_len("excerpt", summary.excerpt.as_deref(), MAX_EXCERPT);

    let slug = summary.slug.as_str();
    if slug.is_empty() || slug::slugify(slug) != slug {
        report.push("slug", format!("{:?} is not URL-safe", slug));
    }

    if summary.main_image.is_none() {
        report.push("mainImage", "required");
    }
    if summary.published_at.is_none() {
        report.push("publishedAt", "required");
    }

    if let Some(minutes) = summary.reading_time {
        let (min, max) = READING_TIME;
        if !(f64::from(min)..=f64::from(max)).contains(&minutes) {
            report.push(
                "readingTime",
                format!("{} minutes, expected {}-{}", minutes, min, max),
            );
        }
    }

    if post.body.is_empty() {
        report.push("body", "required");
    }
    check_body(&mut report, &post.body);

    if let Some(seo) = &post.seo {
        check_seo(&mut report, seo);
    }

    report.violations
}

fn check_body(report: &mut Report<'_>, body: &[Node]) {
    for (index, node) in body.iter().enumerate() {
        match node {
            Node::Image(image) if image.alt_text().trim().is_empty() => {
                report.push(format!("body[{}].alt", index), "required");
            }
            Node::Carousel(carousel) => {
                let (min, max) = CAROUSEL_IMAGES;
                let count = carousel.images.len();
                if !(min..=max).contains(&count) {
                    report.push(
                        format!("body[{}].images", index),
                        format!("{} images, expected {}-{}", count, min, max),
                    );
                }
                for (i, image) in carousel.images.iter().enumerate() {
                    if image.alt_text().trim().is_empty() {
                        report.push(format!("body[{}].images[{}].alt", index, i), "required");
                    }
                }
            }
            Node::Unknown { kind } => {
                report.push(
                    format!("body[{}]", index),
                    format!("unsupported node type {:?}", kind),
                );
            }
            _ => {}
        }
    }
}

fn check_seo(report: &mut Report<'_>, seo: &Seo) {
    report.max_len("seo.metaTitle", seo.meta_title.as_deref(), MAX_SEO_TITLE);
    report.max_len(
        "seo.metaDescription",
        seo.meta_description.as_deref(),
        MAX_SEO_DESCRIPTION,
    );
}
