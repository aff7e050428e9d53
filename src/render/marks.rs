//! Inline mark rendering

use crate::content::{Mark, Span};
use crate::helpers::html_escape;

/// Render a sequence of spans to inline HTML
pub fn render_spans(spans: &[Span]) -> String {
    spans.iter().map(render_span).collect()
}

/// Render one span; the first mark becomes the outermost wrapper
pub fn render_span(span: &Span) -> String {
    span.marks
        .iter()
        .rev()
        .fold(html_escape(&span.text), |inner, mark| wrap(mark, &inner))
}

fn wrap(mark: &Mark, inner: &str) -> String {
    match mark {
        Mark::Strong => format!("<strong>{}</strong>", inner),
        Mark::Emphasis => format!("<em>{}</em>", inner),
        Mark::Underline => format!("<u>{}</u>", inner),
        Mark::Link { href, blank: true } => format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            html_escape(href),
            inner
        ),
        Mark::Link { href, blank: false } => format!(
            r#"<a href="{}" target="_self">{}</a>"#,
            html_escape(href),
            inner
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_escaped() {
        assert_eq!(render_span(&Span::plain("a < b")), "a &lt; b");
    }

    #[test]
    fn test_bold_link_nests_and_keeps_text() {
        let span = Span::marked(
            "Voir",
            vec![
                Mark::Strong,
                Mark::Link {
                    href: "https://x".into(),
                    blank: true,
                },
            ],
        );
        assert_eq!(
            render_span(&span),
            r#"<strong><a href="https://x" target="_blank" rel="noopener noreferrer">Voir</a></strong>"#
        );
    }

    #[test]
    fn test_same_tab_link_and_decorators() {
        let span = Span::marked(
            "ici",
            vec![
                Mark::Link {
                    href: "/about".into(),
                    blank: false,
                },
                Mark::Emphasis,
                Mark::Underline,
            ],
        );
        assert_eq!(
            render_span(&span),
            r#"<a href="/about" target="_self"><em><u>ici</u></em></a>"#
        );
    }

    #[test]
    fn test_spans_concatenate_in_order() {
        let spans = vec![
            Span::plain("Un "),
            Span::marked("deux", vec![Mark::Strong]),
            Span::plain(" trois"),
        ];
        assert_eq!(render_spans(&spans), "Un <strong>deux</strong> trois");
    }
}
