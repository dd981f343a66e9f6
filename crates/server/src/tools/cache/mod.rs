//! Cache-related MCP tools.
//!
//! This module provides tools for inspecting the host cache.

pub mod status;

pub use status::{CacheStatusParams, status_impl};
