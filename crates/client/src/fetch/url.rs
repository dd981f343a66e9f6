//! URL normalization: origins from user input and absolute icon URLs.

pub use sitemeta_core::ensure_scheme;

/// Error type for URL normalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("no host in URL: {0}")]
    NoHost(String),
}

/// Reduce user input to its origin, `scheme://host[:port]`.
///
/// Input is parsed as-is first; when that yields no host, `http://` is
/// prefixed and parsing is retried once.
pub fn format_url(input: &str) -> Result<String, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let direct = url::Url::parse(trimmed).ok().and_then(|u| origin_of(&u));
    if let Some(origin) = direct {
        return Ok(origin);
    }

    url::Url::parse(&ensure_scheme(trimmed))
        .ok()
        .and_then(|u| origin_of(&u))
        .ok_or_else(|| UrlError::NoHost(trimmed.to_string()))
}

/// Origin of a parsed URL, or `None` when it has no (or an empty) host.
///
/// Default ports are omitted because the parser drops them.
pub fn origin_of(url: &url::Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    let port = url.port().map(|p| format!(":{p}")).unwrap_or_default();
    Some(format!("{}://{host}{port}", url.scheme()))
}

/// Make `candidate` absolute against `base`.
///
/// - anything containing `://` is returned unchanged
/// - `//host/path` takes the scheme of `base`
/// - `/path` takes the origin of `base`
/// - other paths are joined to the directory of the base path, then `.`,
///   `..` and empty segments are collapsed; `..` at the root is a no-op
///
/// An unparseable `base` leaves `candidate` unchanged.
pub fn filter_relative_url(candidate: &str, base: &str) -> String {
    if candidate.contains("://") {
        return candidate.to_string();
    }

    let Some((base_url, root)) = url::Url::parse(base)
        .ok()
        .and_then(|u| origin_of(&u).map(|root| (u, root)))
    else {
        return candidate.to_string();
    };

    if candidate.starts_with("//") {
        return format!("{}:{candidate}", base_url.scheme());
    }

    if candidate.starts_with('/') {
        return format!("{root}{candidate}");
    }

    let base_path = base_url.path();
    let dir = &base_path[..base_path.rfind('/').map_or(0, |i| i + 1)];

    let mut segments: Vec<&str> = Vec::new();
    for segment in dir.split('/').chain(candidate.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    format!("{root}/{}", segments.join("/"))
}
