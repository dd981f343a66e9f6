//! Page metadata extraction by pattern matching.
//!
//! Not an HTML parser: each field comes from the first match of
//! a fixed, case-insensitive pattern over the page text with line breaks
//! removed. Attribute orders or quoting styles other than the ones below are
//! not recognised.
//!
//! | field       | pattern                                        | default  |
//! |-------------|------------------------------------------------|----------|
//! | title       | `<title>…</title>`                             | `""`     |
//! | description | `<meta name="description" content="…"`         | `""`     |
//! | keywords    | `<meta name="keywords" content="…"`            | `""`     |
//! | canonical   | `<link rel="canonical" href="…"`               | base URL |

pub mod icon;

pub use icon::extract_icon_href;

use regex::Regex;
use std::sync::LazyLock;

static TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<title>(.*?)</title>").expect("invalid regex"));
static DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+name="description"\s+content="(.*?)""#).expect("invalid regex"));
static KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+name="keywords"\s+content="(.*?)""#).expect("invalid regex"));
static CANONICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<link\s+rel="canonical"\s+href="(.*?)""#).expect("invalid regex"));

/// Title, description, keywords and canonical URL of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub canonical: String,
}

/// Extract page metadata from `html`.
///
/// `canonical` falls back to `base_url`; the other fields fall back to `""`.
pub fn extract_meta(html: &str, base_url: &str) -> PageMeta {
    let flat = html.replace(['\n', '\r'], "");

    PageMeta {
        title: first_capture(&TITLE, &flat).unwrap_or_default(),
        description: first_capture(&DESCRIPTION, &flat).unwrap_or_default(),
        keywords: first_capture(&KEYWORDS, &flat).unwrap_or_default(),
        canonical: first_capture(&CANONICAL, &flat).unwrap_or_else(|| base_url.to_string()),
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
