//! MCP tool implementations.
//!
//! This module contains all tools exposed by the mcp-sitemeta server.

pub mod cache;
pub mod site_info;

pub use cache::{CacheStatusParams, status_impl};
pub use site_info::{SiteInfoParams, site_info_impl};
