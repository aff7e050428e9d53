//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded in the binary. Handlers build the view models
//! below and hand them to [`TemplateRenderer`].

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::helpers::{self, DateFormatter};

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("post.html", include_str!("site/post.html")),
            ("page.html", include_str!("site/page.html")),
            ("about.html", include_str!("site/about.html")),
            ("contact.html", include_str!("site/contact.html")),
            ("categories.html", include_str!("site/categories.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            ("error.html", include_str!("site/error.html")),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(template_name, context)
    }

    /// Render a page: site and head data are always present
    pub fn render_page<T: Serialize>(
        &self,
        template_name: &str,
        site: &SiteData,
        head: &HeadData,
        key: &str,
        value: &T,
    ) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("head", head);
        context.insert(key, value);
        self.render(template_name, &context)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    Ok(tera::Value::String(helpers::truncate(
        &s,
        length,
        Some(&omission),
    )))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub language: String,
    pub root: String,
    pub contact_email: String,
    pub author: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            language: config.language.clone(),
            root: helpers::url_for(config, ""),
            contact_email: config.contact_email.clone(),
            author: config.author.clone(),
        }
    }
}

/// Document head: title, canonical URL and meta tags
#[derive(Debug, Clone, Serialize)]
pub struct HeadData {
    pub title: String,
    pub canonical: String,
    pub meta: String,
    pub generator: String,
}

impl HeadData {
    /// Head for a page at `path`; `kind` is the Open Graph type
    pub fn new(
        config: &SiteConfig,
        title: &str,
        description: Option<&str>,
        path: &str,
        image: Option<&str>,
        kind: &str,
    ) -> Self {
        let canonical = helpers::full_url_for(config, path);
        let meta = helpers::open_graph(title, description, &canonical, image, &config.title, kind);
        Self {
            title: title.to_string(),
            canonical,
            meta,
            generator: helpers::meta_generator(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostListItem {
    /// Two-digit position in the list, starting at "01"
    pub index: String,
    pub title: String,
    pub url: String,
    pub date: String,
    pub date_iso: String,
    pub author: String,
    pub category: String,
    pub excerpt: Option<String>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorData {
    pub name: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleData {
    pub title: String,
    pub category: String,
    pub date: String,
    pub date_iso: String,
    pub author: AuthorData,
    /// Minutes as displayed, e.g. "7" or "7.5"
    pub reading_time: Option<String>,
    pub excerpt: Option<String>,
    pub hero: Option<String>,
    /// Rendered body fragment
    pub body: String,
    /// Rendered gallery figures
    pub gallery: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryData {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
}

/// Dates as displayed and as `<time datetime>` values
pub fn date_pair(
    formatter: &DateFormatter,
    date: &chrono::DateTime<chrono::Utc>,
) -> (String, String) {
    (formatter.long(date), formatter.iso(date))
}

/// Reading time without a trailing ".0" on whole minutes
pub fn reading_minutes(minutes: f64) -> String {
    if minutes.fract() == 0.0 {
        format!("{:.0}", minutes)
    } else {
        minutes.to_string()
    }
}
