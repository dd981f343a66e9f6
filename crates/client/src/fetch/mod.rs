//! HTTP fetch pipeline for pages and icons.
//!
//! ### Request policy
//! - One GET per call, no retries
//! - Max redirects: 3 (configurable)
//! - Total timeout per call, fixed User-Agent
//! - TLS certificate verification can be switched off
//!
//! ### Outcome
//! - `Ok` iff the final HTTP status is in `[200, 400)`
//! - Network errors, oversized bodies and redirect loops are `Fail` values,
//!   never errors; callers fall back instead of aborting
//! - Image fetches drop payloads that do not decode as an image

pub mod url;
pub mod validate;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode, Url, header};
use std::time::{Duration, Instant};

pub use self::url::{UrlError, ensure_scheme, filter_relative_url, format_url, origin_of};
pub use self::validate::{image_dimensions, is_image};

use sitemeta_core::{AppConfig, Error};

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const IMAGE_ACCEPT: &str = "image/avif,image/webp,image/png,image/svg+xml,image/*;q=0.8,*/*;q=0.5";

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Total request timeout (default: 5s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 3)
    pub max_redirects: usize,

    /// Skip TLS certificate and hostname checks (default: true)
    pub accept_invalid_certs: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            max_redirects: config.max_redirects,
            accept_invalid_certs: config.accept_invalid_certs,
        }
    }
}

/// Coarse outcome of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Ok,
    Fail,
}

/// Result of one fetch.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: FetchStatus,
    /// Response body; `None` on network failure or rejected image payloads.
    pub data: Option<Bytes>,
    /// URL after redirects, when a response arrived
    pub effective_url: Option<Url>,
    /// Final HTTP status, when a response arrived
    pub http_status: Option<StatusCode>,
}

impl FetchResult {
    /// A fetch that produced no response.
    pub fn failed() -> Self {
        Self { status: FetchStatus::Fail, data: None, effective_url: None, http_status: None }
    }

    pub fn is_ok(&self) -> bool {
        self.status == FetchStatus::Ok
    }

    /// Body decoded as UTF-8 (lossy); empty when there is no body.
    pub fn text(&self) -> String {
        self.data
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default()
    }
}

/// Anything that can fetch a URL the way [`FetchClient`] does.
///
/// The favicon resolver and the site pipeline depend on this rather than on
/// the concrete client.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url`; with `expect_image`, keep the body only if it is an image.
    async fn fetch(&self, url: &str, expect_image: bool) -> FetchResult;
}

/// HTTP fetch client.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpClient(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    async fn get(&self, url_str: &str, expect_image: bool) -> FetchResult {
        let start = Instant::now();

        let url = match Url::parse(url_str) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("not fetching {}: {}", url_str, e);
                return FetchResult::failed();
            }
        };

        let accept = if expect_image { IMAGE_ACCEPT } else { HTML_ACCEPT };
        let response = match self.http.get(url.clone()).header(header::ACCEPT, accept).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("fetch of {} failed: {}", url, e);
                return FetchResult::failed();
            }
        };

        let http_status = response.status();
        let effective_url = response.url().clone();

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            tracing::debug!("{} declares {} bytes, over {}", url, len, self.config.max_bytes);
            return FetchResult::failed();
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("reading body of {} failed: {}", url, e);
                return FetchResult::failed();
            }
        };

        if bytes.len() > self.config.max_bytes {
            tracing::debug!("{} returned {} bytes, over {}", url, bytes.len(), self.config.max_bytes);
            return FetchResult::failed();
        }

        let status = if (200..400).contains(&http_status.as_u16()) { FetchStatus::Ok } else { FetchStatus::Fail };

        let data = if expect_image && !is_image(&bytes) {
            tracing::debug!("invalid image data from {}", url);
            None
        } else {
            Some(bytes)
        };

        tracing::debug!(
            "fetched {} -> {} ({}) in {}ms ({} bytes)",
            url,
            effective_url,
            http_status.as_u16(),
            start.elapsed().as_millis(),
            data.as_ref().map_or(0, |b| b.len())
        );

        FetchResult { status, data, effective_url: Some(effective_url), http_status: Some(http_status) }
    }
}

#[async_trait]
impl PageFetcher for FetchClient {
    async fn fetch(&self, url: &str, expect_image: bool) -> FetchResult {
        self.get(url, expect_image).await
    }
}
