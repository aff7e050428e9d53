//! Article body rendering
//!
//! [`render_body`] maps each body node to one [`Rendered`] block, keeping
//! document order. Nodes the model marks as unknown produce nothing.
//! [`to_html`] then assembles the blocks into a fragment, grouping runs of
//! list items into `<ul>`/`<ol>` elements.

mod marks;

pub use marks::{render_span, render_spans};

use crate::content::{Image, ListStyle, Node, TextStyle};
use crate::helpers::html_escape;
use crate::image::{self, ImageResolver};

/// One rendered body node
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Text {
        style: TextStyle,
        html: String,
    },
    /// Item markup without the surrounding list
    ListItem {
        style: ListStyle,
        level: u8,
        html: String,
    },
    Image(String),
    /// One figure per stored image, in stored order
    Carousel {
        title: Option<String>,
        images: Vec<String>,
    },
}

/// Render every recognized node, in order
pub fn render_body(nodes: &[Node], images: &dyn ImageResolver) -> Vec<Rendered> {
    nodes
        .iter()
        .filter_map(|node| render_node(node, images))
        .collect()
}

/// Render a body straight to an HTML fragment
pub fn render_document(nodes: &[Node], images: &dyn ImageResolver) -> String {
    to_html(&render_body(nodes, images))
}

/// Render a single node; `None` for nodes that are not displayed
pub fn render_node(node: &Node, images: &dyn ImageResolver) -> Option<Rendered> {
    match node {
        Node::Block(block) => Some(Rendered::Text {
            style: block.style,
            html: wrap_text(block.style, &render_spans(&block.spans)),
        }),
        Node::ListItem(item) => Some(Rendered::ListItem {
            style: item.style,
            level: item.level,
            html: render_spans(&item.spans),
        }),
        Node::Image(img) => Some(Rendered::Image(render_figure(
            img,
            images,
            image::BODY,
            Some(img.size().class()),
        ))),
        Node::Carousel(carousel) => Some(Rendered::Carousel {
            title: carousel.title.clone(),
            images: carousel
                .images
                .iter()
                .map(|img| render_figure(img, images, image::TILE, None))
                .collect(),
        }),
        Node::Unknown { kind } => {
            tracing::trace!("Not rendering node of type {:?}", kind);
            None
        }
    }
}

fn wrap_text(style: TextStyle, inner: &str) -> String {
    match style {
        TextStyle::Paragraph => format!("<p>{}</p>", inner),
        TextStyle::Heading2 => format!("<h2>{}</h2>", inner),
        TextStyle::Heading3 => format!("<h3>{}</h3>", inner),
        TextStyle::Heading4 => format!("<h4>{}</h4>", inner),
        TextStyle::Quote => format!("<blockquote>{}</blockquote>", inner),
        TextStyle::Caption => format!(r#"<p class="caption">{}</p>"#, inner),
    }
}

/// A `<figure>` with the image and its optional caption
pub fn render_figure(
    img: &Image,
    images: &dyn ImageResolver,
    size: (u32, u32),
    class: Option<&str>,
) -> String {
    let class_attr = class
        .map(|c| format!(r#" class="{}""#, c))
        .unwrap_or_default();
    let caption = img
        .caption
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(|c| format!("<figcaption>{}</figcaption>", html_escape(c)))
        .unwrap_or_default();

    format!(
        r#"<figure{}><img src="{}" alt="{}" width="{}" height="{}" loading="lazy">{}</figure>"#,
        class_attr,
        html_escape(&images.image_url(img, size)),
        html_escape(img.alt_text()),
        size.0,
        size.1,
        caption
    )
}

impl Rendered {
    /// Standalone markup for this block
    pub fn to_html(&self) -> String {
        match self {
            Rendered::Text { html, .. } | Rendered::Image(html) => html.clone(),
            Rendered::ListItem { html, .. } => format!("<li>{}</li>", html),
            Rendered::Carousel { title, images } => {
                let title = title
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .map(|t| format!(r#"<p class="carousel-title">{}</p>"#, html_escape(t)))
                    .unwrap_or_default();
                format!(
                    r#"<div class="carousel">{}<div class="carousel-grid">{}</div></div>"#,
                    title,
                    images.concat()
                )
            }
        }
    }
}

/// Assemble rendered blocks into one HTML fragment
pub fn to_html(blocks: &[Rendered]) -> String {
    let mut out = String::new();
    let mut lists = ListStack::default();

    for block in blocks {
        match block {
            Rendered::ListItem { style, level, html } => {
                lists.push(&mut out, *style, *level, html);
            }
            other => {
                lists.close_all(&mut out);
                out.push_str(&other.to_html());
            }
        }
        out.push('\n');
    }
    lists.close_all(&mut out);

    out
}

/// Open lists while assembling consecutive list items
#[derive(Default)]
struct ListStack {
    open: Vec<(ListStyle, u8)>,
}

impl ListStack {
    fn push(&mut self, out: &mut String, style: ListStyle, level: u8, html: &str) {
        while let Some(&(open_style, open_level)) = self.open.last() {
            if open_level > level || (open_level == level && open_style != style) {
                self.close_one(out);
            } else {
                break;
            }
        }

        match self.open.last() {
            Some(&(_, open_level)) if open_level == level => out.push_str("</li>"),
            _ => {
                out.push_str(list_tag(style, true));
                self.open.push((style, level));
            }
        }
        out.push_str("<li>");
        out.push_str(html);
    }

    fn close_one(&mut self, out: &mut String) {
        if let Some((style, _)) = self.open.pop() {
            out.push_str("</li>");
            out.push_str(list_tag(style, false));
        }
    }

    fn close_all(&mut self, out: &mut String) {
        while !self.open.is_empty() {
            self.close_one(out);
        }
    }
}

fn list_tag(style: ListStyle, open: bool) -> &'static str {
    match (style, open) {
        (ListStyle::Bullet, true) => "<ul>",
        (ListStyle::Bullet, false) => "</ul>",
        (ListStyle::Number, true) => "<ol>",
        (ListStyle::Number, false) => "</ol>",
    }
}
