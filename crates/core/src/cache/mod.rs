//! Host-keyed file cache for site lookups.
//!
//! This module stores one serialized result per host on disk:
//!
//! - File names derived from an HMAC of the host (see [`hash`])
//! - A secret persisted next to the entries, stable across restarts
//! - Expiry by file modification time, shortened for placeholder results
//! - Atomic replacement through temp file and rename

pub mod hash;
pub mod secret;
pub mod store;

pub use crate::Error;

pub use hash::{cache_file_name, cache_host, content_digest};
pub use secret::CacheSecret;
pub use store::{CacheFileStatus, HostCache, PLACEHOLDER_EXPIRE};
