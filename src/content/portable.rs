//! Rich-text body model
//!
//! Article bodies arrive from the store as an ordered array of typed nodes
//! (text blocks, images, carousels). They are decoded into the closed [`Node`]
//! type here. Decoding a single node never fails: anything unrecognized or
//! malformed becomes [`Node::Unknown`], which the renderer drops.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::image::{images_from_values, Image};

/// One unit of body content
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Block(TextBlock),
    ListItem(ListItem),
    Image(Image),
    Carousel(Carousel),
    /// A node this renderer does not know how to display
    Unknown { kind: String },
}

/// Presentation style of a text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Paragraph,
    Heading2,
    Heading3,
    Heading4,
    Quote,
    Caption,
}

/// A text block made of marked spans
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub style: TextStyle,
    pub spans: Vec<Span>,
}

/// Kind of list an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Bullet,
    Number,
}

/// A list item; consecutive items form a list
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub style: ListStyle,
    /// Nesting depth, starting at 1
    pub level: u8,
    pub spans: Vec<Span>,
}

/// A group of images shown together
#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    pub title: Option<String>,
    pub images: Vec<Image>,
}

/// A run of text with its marks
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub marks: Vec<Mark>,
}

/// Inline presentation annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    Strong,
    Emphasis,
    Underline,
    Link { href: String, blank: bool },
}

impl Span {
    /// A span without marks
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// A span with the given marks, outermost first
    pub fn marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }
}

impl Node {
    /// A plain paragraph
    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::text(TextStyle::Paragraph, text)
    }

    /// A single-span block with the given style
    pub fn text(style: TextStyle, text: impl Into<String>) -> Self {
        Node::Block(TextBlock {
            style,
            spans: vec![Span::plain(text)],
        })
    }

    /// Decode a node from its store representation
    pub fn from_value(value: Value) -> Self {
        let kind = value
            .get("_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let decoded = match kind.as_str() {
            "block" => serde_json::from_value::<RawBlock>(value).map(RawBlock::into_node),
            "image" => serde_json::from_value::<Image>(value).map(Node::Image),
            "carousel" => serde_json::from_value::<RawCarousel>(value).map(RawCarousel::into_node),
            _ => return Node::Unknown { kind },
        };

        decoded.unwrap_or_else(|e| {
            tracing::debug!("Dropping malformed {} node: {}", kind, e);
            Node::Unknown { kind }
        })
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Node::from_value)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlock {
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    list_item: Option<String>,
    #[serde(default)]
    level: Option<u8>,
    #[serde(default)]
    children: Vec<RawChild>,
    #[serde(default)]
    mark_defs: Vec<RawMarkDef>,
}

#[derive(Deserialize)]
#[serde(tag = "_type")]
enum RawChild {
    #[serde(rename = "span")]
    Span {
        #[serde(default)]
        text: String,
        #[serde(default)]
        marks: Vec<String>,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct RawMarkDef {
    #[serde(rename = "_key")]
    key: String,
    #[serde(rename = "_type")]
    kind: String,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    blank: Option<bool>,
}

impl RawBlock {
    fn into_node(self) -> Node {
        let spans = self.spans();

        if let Some(list) = self.list_item.as_deref() {
            let style = match list {
                "bullet" => ListStyle::Bullet,
                "number" => ListStyle::Number,
                other => {
                    return Node::Unknown {
                        kind: format!("block:list:{}", other),
                    }
                }
            };
            return Node::ListItem(ListItem {
                style,
                level: self.level.unwrap_or(1).max(1),
                spans,
            });
        }

        let style = match self.style.as_deref().unwrap_or("normal") {
            "normal" => TextStyle::Paragraph,
            "h2" => TextStyle::Heading2,
            "h3" => TextStyle::Heading3,
            "h4" => TextStyle::Heading4,
            "blockquote" => TextStyle::Quote,
            "caption" => TextStyle::Caption,
            other => {
                return Node::Unknown {
                    kind: format!("block:{}", other),
                }
            }
        };
        Node::Block(TextBlock { style, spans })
    }

    fn spans(&self) -> Vec<Span> {
        self.children
            .iter()
            .filter_map(|child| match child {
                RawChild::Span { text, marks } => Some(Span {
                    text: text.clone(),
                    marks: marks.iter().filter_map(|m| self.resolve_mark(m)).collect(),
                }),
                RawChild::Other => None,
            })
            .collect()
    }

    fn resolve_mark(&self, name: &str) -> Option<Mark> {
        match name {
            "strong" => Some(Mark::Strong),
            "em" => Some(Mark::Emphasis),
            "underline" => Some(Mark::Underline),
            key => {
                let def = self.mark_defs.iter().find(|d| d.key == key)?;
                match (def.kind.as_str(), &def.href) {
                    ("link", Some(href)) => Some(Mark::Link {
                        href: href.clone(),
                        blank: def.blank.unwrap_or(false),
                    }),
                    _ => None,
                }
            }
        }
    }
}

#[derive(Deserialize)]
struct RawCarousel {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    images: Vec<Value>,
}

impl RawCarousel {
    fn into_node(self) -> Node {
        Node::Carousel(Carousel {
            title: self.title,
            images: images_from_values(self.images),
        })
    }
}
