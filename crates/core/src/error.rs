//! Unified error types for sitemeta.
//!
//! Network failures during page or icon fetches are not errors: they are
//! reported as `FetchStatus::Fail` values and the pipeline degrades instead.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the sitemeta server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty URL).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// No host could be determined from the URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Host is not covered by the configured allowlist.
    #[error("DOMAIN_NOT_ALLOWED: {0}")]
    DomainNotAllowed(String),

    /// Cache directory could not be created.
    #[error("CACHE_DIR: {0}")]
    CacheDir(String),

    /// Reading or writing a cache file failed.
    #[error("CACHE_ERROR: {0}")]
    CacheIo(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP_CLIENT: {0}")]
    HttpClient(String),

    /// Result could not be serialized.
    #[error("SERIALIZE_FAILED: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::InvalidUrl(msg) => (-32003, msg.clone()),
            Error::DomainNotAllowed(msg) => (-32004, msg.clone()),
            Error::CacheDir(msg) => (-32002, msg.clone()),
            Error::CacheIo(msg) => (-32002, msg.clone()),
            Error::HttpClient(msg) => (-32008, msg.clone()),
            Error::Serialize(e) => (-32000, e.to_string()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
