//! Site lookup pipeline: page fetch, metadata, favicon.

use std::time::Instant;

use sitemeta_core::{AppConfig, Error, Performance, SiteInfo};

use crate::extract::{PageMeta, extract_meta};
use crate::favicon::{Favicon, FaviconResolver};
use crate::fetch::{FetchClient, FetchConfig, PageFetcher, ensure_scheme, format_url};

/// Everything a lookup produced, including the favicon bytes that are not
/// part of [`SiteInfo`].
#[derive(Debug, Clone)]
pub struct SiteLookup {
    pub info: SiteInfo,
    pub favicon: Favicon,
}

/// Looks up metadata and favicon for a URL.
pub struct SiteInfoService<F = FetchClient> {
    fetcher: F,
    resolver: FaviconResolver,
    fetch_meta: bool,
}

impl SiteInfoService<FetchClient> {
    /// Build the service with a real HTTP client from application config.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let fetcher = FetchClient::new(FetchConfig::from(config))?;
        Ok(Self::new(fetcher, FaviconResolver::from(config), config.fetch_meta))
    }
}

impl<F: PageFetcher> SiteInfoService<F> {
    pub fn new(fetcher: F, resolver: FaviconResolver, fetch_meta: bool) -> Self {
        Self { fetcher, resolver, fetch_meta }
    }

    /// Look up `url` with the configured metadata setting.
    pub async fn site_info(&self, url: &str) -> Result<SiteInfo, Error> {
        Ok(self.lookup(url, self.fetch_meta).await?.info)
    }

    /// Look up `url`. Input without a scheme is treated as `http://`.
    ///
    /// Fails only when no host can be derived from `url`. If the page itself
    /// cannot be fetched, the origin is tried instead; if that fails too the
    /// metadata stays empty and the favicon chain runs on an empty page.
    pub async fn lookup(&self, url: &str, fetch_meta: bool) -> Result<SiteLookup, Error> {
        let start = Instant::now();
        let url = &ensure_scheme(url.trim());

        let origin = format_url(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;

        let mut page = self.fetcher.fetch(url, false).await;
        if !page.is_ok() {
            tracing::debug!("page {} not available, trying {}", url, origin);
            page = self.fetcher.fetch(&origin, false).await;
        }
        let html = page.text();

        let meta = if fetch_meta && !html.is_empty() { extract_meta(&html, url) } else { PageMeta::default() };

        let favicon = self.resolver.resolve(&self.fetcher, &html, url, &origin).await;

        let info = SiteInfo {
            title: meta.title,
            description: meta.description,
            keywords: meta.keywords,
            canonical: meta.canonical,
            favicon_url: favicon.url.clone(),
            host: origin,
            performance: Performance::measure(start.elapsed()),
        };

        tracing::debug!(host = %info.host, favicon = %info.favicon_url, source = ?favicon.source, "site lookup finished");

        Ok(SiteLookup { info, favicon })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favicon::FaviconSource;
    use crate::fetch::validate::tests::encoded;
    use image::ImageFormat;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service() -> SiteInfoService {
        let config = AppConfig { timeout_ms: 2_000, ..Default::default() };
        SiteInfoService::from_config(&config).unwrap()
    }

    async fn mount_page(server: &MockServer, route: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(server)
            .await;
    }

    async fn mount_icon(server: &MockServer, route: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(encoded(16, 16, ImageFormat::Png)))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_lookup_with_declared_icon() {
        let server = MockServer::start().await;
        let html = r#"<html><head>
            <title>Example Site</title>
            <meta name="description" content="About things">
            <meta name="keywords" content="a,b">
            <link rel="icon" href="/static/f.png">
            </head></html>"#;
        mount_page(&server, "/blog/post", 200, html).await;
        mount_icon(&server, "/static/f.png").await;

        let url = format!("{}/blog/post", server.uri());
        let lookup = service().lookup(&url, true).await.unwrap();

        assert_eq!(lookup.info.title, "Example Site");
        assert_eq!(lookup.info.description, "About things");
        assert_eq!(lookup.info.keywords, "a,b");
        assert_eq!(lookup.info.canonical, url);
        assert_eq!(lookup.info.host, server.uri());
        assert_eq!(lookup.info.favicon_url, format!("{}/static/f.png", server.uri()));
        assert_eq!(lookup.favicon.source, FaviconSource::Declared);
        assert!(lookup.favicon.data.is_some());
        assert!(lookup.info.performance.time_spent.ends_with('s'));
        assert!(lookup.info.performance.memory_usage.ends_with("MB"));
    }

    #[tokio::test]
    async fn test_lookup_default_favicon_path() {
        let server = MockServer::start().await;
        mount_page(&server, "/", 200, "<title>Plain</title>").await;
        mount_icon(&server, "/favicon.ico").await;

        let url = format!("{}/", server.uri());
        let info = service().site_info(&url).await.unwrap();

        assert_eq!(info.title, "Plain");
        assert_eq!(info.favicon_url, format!("{}/favicon.ico", server.uri()));
    }

    #[tokio::test]
    async fn test_lookup_falls_back_to_origin_page() {
        let server = MockServer::start().await;
        mount_page(&server, "/gone", 404, "<title>Not Found</title>").await;
        mount_page(&server, "/", 200, "<title>Home</title>").await;

        let info = service().site_info(&format!("{}/gone", server.uri())).await.unwrap();

        assert_eq!(info.title, "Home");
    }

    #[tokio::test]
    async fn test_lookup_unreachable_site_uses_fallback_service() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let info = service().site_info(&format!("http://{addr}/")).await.unwrap();

        assert_eq!(info.title, "");
        assert_eq!(info.canonical, "");
        assert_eq!(info.host, format!("http://{addr}"));
        assert!(info.favicon_url.starts_with("https://t3.gstatic.com/faviconV2"));
        assert!(info.favicon_url.contains(&addr.to_string()));
    }

    #[tokio::test]
    async fn test_lookup_without_metadata() {
        let server = MockServer::start().await;
        mount_page(&server, "/", 200, r#"<title>Skipped</title><link rel="icon" href="/i.png">"#).await;
        mount_icon(&server, "/i.png").await;

        let lookup = service().lookup(&format!("{}/", server.uri()), false).await.unwrap();

        assert_eq!(lookup.info.title, "");
        assert_eq!(lookup.info.canonical, "");
        assert_eq!(lookup.info.favicon_url, format!("{}/i.png", server.uri()));
    }

    #[tokio::test]
    async fn test_lookup_without_scheme() {
        let server = MockServer::start().await;
        mount_page(&server, "/", 200, r#"<title>Bare</title><link rel="icon" href="/f.png">"#).await;
        mount_icon(&server, "/f.png").await;
        let bare = server.uri().trim_start_matches("http://").to_string();

        let info = service().site_info(&bare).await.unwrap();

        assert_eq!(info.title, "Bare");
        assert_eq!(info.host, server.uri());
        assert_eq!(info.canonical, format!("http://{bare}"));
        assert_eq!(info.favicon_url, format!("{}/f.png", server.uri()));
    }

    #[tokio::test]
    async fn test_lookup_invalid_url() {
        let result = service().site_info("not a url###").await;
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_lookup_slow_site_degrades() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let config = AppConfig { timeout_ms: 200, ..Default::default() };
        let info = SiteInfoService::from_config(&config)
            .unwrap()
            .site_info(&server.uri())
            .await
            .unwrap();

        assert_eq!(info.title, "");
        assert!(info.favicon_url.starts_with("https://t3.gstatic.com/"));
    }
}
