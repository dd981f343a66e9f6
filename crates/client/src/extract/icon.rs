//! Declared favicon lookup in page HTML.

use regex::Regex;
use std::sync::LazyLock;

use crate::fetch::filter_relative_url;

/// First `<link>` whose `rel` is one of the icon relations.
static ICON_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<link[^>]+rel=.(icon|shortcut icon|alternate icon|apple-touch-icon)[^>]+>").expect("invalid regex")
});

static HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)href=(?:"([^"]*)"|'([^']*)')"#).expect("invalid regex"));

/// Absolute URL of the icon declared in `html`, if any.
///
/// Only the first icon `<link>` is considered; if it has no quoted `href`,
/// there is no declared icon.
pub fn extract_icon_href(html: &str, base_url: &str) -> Option<String> {
    if html.is_empty() {
        return None;
    }

    let tag = ICON_LINK.find(html)?;
    let captures = HREF.captures(tag.as_str())?;
    let href = captures.get(1).or_else(|| captures.get(2))?.as_str().trim();

    Some(filter_relative_url(href, base_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_root_relative() {
        let html = r#"<link rel="icon" href="/f.ico">"#;
        assert_eq!(extract_icon_href(html, "http://a.com").as_deref(), Some("http://a.com/f.ico"));
    }

    #[test]
    fn test_shortcut_icon_single_quotes() {
        let html = "<link rel='shortcut icon' type='image/x-icon' href='img/fav.ico' />";
        assert_eq!(extract_icon_href(html, "https://a.com/blog/post").as_deref(), Some("https://a.com/blog/img/fav.ico"));
    }

    #[test]
    fn test_apple_touch_icon_absolute() {
        let html = r#"<LINK REL="apple-touch-icon" HREF="https://cdn.test/touch.png">"#;
        assert_eq!(extract_icon_href(html, "http://a.com").as_deref(), Some("https://cdn.test/touch.png"));
    }

    #[test]
    fn test_alternate_icon_protocol_relative() {
        let html = r#"<link rel="alternate icon" href="//static.a.com/i.svg">"#;
        assert_eq!(extract_icon_href(html, "https://a.com").as_deref(), Some("https://static.a.com/i.svg"));
    }

    #[test]
    fn test_first_icon_wins() {
        let html = r#"<link rel="stylesheet" href="/s.css">
            <link rel="icon" href="/first.png">
            <link rel="icon" href="/second.png">"#;
        assert_eq!(extract_icon_href(html, "http://a.com").as_deref(), Some("http://a.com/first.png"));
    }

    #[test]
    fn test_tag_spanning_lines() {
        let html = "<link\n  rel=\"icon\"\n  href=\" /f.png \"\n>";
        assert_eq!(extract_icon_href(html, "http://a.com").as_deref(), Some("http://a.com/f.png"));
    }

    #[test]
    fn test_no_icon_link() {
        let html = r#"<link rel="stylesheet" href="/s.css"><title>x</title>"#;
        assert_eq!(extract_icon_href(html, "http://a.com"), None);
    }

    #[test]
    fn test_icon_without_href() {
        let html = r#"<link rel="icon" sizes="any">"#;
        assert_eq!(extract_icon_href(html, "http://a.com"), None);
    }

    #[test]
    fn test_empty_html() {
        assert_eq!(extract_icon_href("", "http://a.com"), None);
    }
}
