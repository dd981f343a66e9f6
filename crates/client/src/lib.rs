//! Client code for sitemeta.
//!
//! This crate provides the HTTP fetch pipeline, metadata extraction, favicon
//! resolution and the lookup service used by the server.

pub mod extract;
pub mod favicon;
pub mod fetch;
pub mod site;

pub use extract::{PageMeta, extract_icon_href, extract_meta};
pub use favicon::{Favicon, FaviconResolver, FaviconSource};
pub use fetch::{
    FetchClient, FetchConfig, FetchResult, FetchStatus, PageFetcher, UrlError, filter_relative_url, format_url,
};
pub use site::{SiteInfoService, SiteLookup};
