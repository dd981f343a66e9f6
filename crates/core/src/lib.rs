//! Core types and shared functionality for sitemeta.
//!
//! This crate provides:
//! - Host-keyed file cache with a persisted hashing secret
//! - Unified error types
//! - Configuration structures
//! - The `SiteInfo` result model

pub mod cache;
pub mod config;
pub mod error;
pub mod origin;
pub mod site;

pub use cache::{CacheSecret, HostCache};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use origin::ensure_scheme;
pub use site::{Performance, SiteInfo, SiteInfoResponse};
