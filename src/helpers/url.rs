//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blog/my-post") // -> "/magazine/blog/my-post"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Path of an article page
pub fn post_path(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &format!("blog/{}", encode_segment(slug)))
}

/// Percent-encode one path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com/".to_string(),
            root: "/mag/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/static/style.css"), "/mag/static/style.css");
        assert_eq!(url_for(&config, ""), "/mag/");
        assert_eq!(url_for(&SiteConfig::default(), "about"), "/about");
    }

    #[test]
    fn test_full_url_for() {
        assert_eq!(
            full_url_for(&test_config(), "/about"),
            "https://example.com/mag/about"
        );
    }

    #[test]
    fn test_post_path_encodes_slug() {
        let config = SiteConfig::default();
        assert_eq!(post_path(&config, "lumiere"), "/blog/lumiere");
        assert_eq!(post_path(&config, "a b/c"), "/blog/a%20b%2Fc");
    }
}
