//! Favicon resolution.
//!
//! Strategies run in order and the first one that yields a URL wins:
//!
//! 1. **Declared**: the page's own icon `<link>`. Its bytes are fetched, but a
//!    failed fetch does not move on to the next strategy.
//! 2. **Default path**: `{origin}/favicon.ico`, accepted when it answers with
//!    a success status and a decodable image.
//! 3. **Fallback**: a third-party favicon service URL for the origin. Never
//!    fetched here.

use bytes::Bytes;

use crate::extract::extract_icon_href;
use crate::fetch::PageFetcher;
use sitemeta_core::AppConfig;

/// Which strategy produced the favicon URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaviconSource {
    Declared,
    DefaultPath,
    Fallback,
}

/// Resolved favicon.
#[derive(Debug, Clone)]
pub struct Favicon {
    pub url: String,
    /// Validated image bytes, when they were fetched successfully.
    pub data: Option<Bytes>,
    pub source: FaviconSource,
}

/// Runs the favicon strategy chain.
#[derive(Debug, Clone)]
pub struct FaviconResolver {
    fallback_service_url: String,
}

impl Default for FaviconResolver {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FaviconResolver {
    fn from(config: &AppConfig) -> Self {
        Self::new(config.fallback_service_url.clone())
    }
}

impl FaviconResolver {
    /// `fallback_service_url` is a prefix; the origin is appended verbatim.
    pub fn new(fallback_service_url: impl Into<String>) -> Self {
        Self { fallback_service_url: fallback_service_url.into() }
    }

    /// URL of the third-party service for `origin`.
    pub fn fallback_url(&self, origin: &str) -> String {
        format!("{}{origin}", self.fallback_service_url)
    }

    /// Resolve the favicon for a page.
    ///
    /// `html` may be empty (page fetch failed); `base_url` resolves relative
    /// icon links; `origin` is `scheme://host[:port]` of the site.
    pub async fn resolve<F: PageFetcher + ?Sized>(
        &self, fetcher: &F, html: &str, base_url: &str, origin: &str,
    ) -> Favicon {
        if let Some(url) = extract_icon_href(html, base_url) {
            let fetched = fetcher.fetch(&url, true).await;
            if !fetched.is_ok() || fetched.data.is_none() {
                tracing::debug!("declared favicon {} could not be fetched", url);
            }
            let data = fetched.is_ok().then_some(fetched.data).flatten();
            return Favicon { url, data, source: FaviconSource::Declared };
        }

        let url = format!("{origin}/favicon.ico");
        let fetched = fetcher.fetch(&url, true).await;
        if fetched.is_ok()
            && let Some(data) = fetched.data
        {
            return Favicon { url, data: Some(data), source: FaviconSource::DefaultPath };
        }

        tracing::debug!("no favicon at {}, using fallback service", url);
        Favicon { url: self.fallback_url(origin), data: None, source: FaviconSource::Fallback }
    }
}
