//! cache_status tool implementation.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sitemeta_core::{Error, ensure_scheme};

use crate::state::AppState;

/// Input parameters for cache_status tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CacheStatusParams {
    /// URL or host whose cache entry to describe.
    pub url: String,
}

/// Report the cache file for a host, whether it exists and how old it is.
pub async fn status_impl(state: &AppState, params: CacheStatusParams) -> Result<CallToolResult, McpError> {
    let raw = params.url.trim();
    if raw.is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    let url = ensure_scheme(raw);
    let status = state.cache.status(&url).await?.ok_or_else(|| Error::InvalidUrl(url.clone()))?;

    let json = serde_json::to_string_pretty(&status).map_err(Error::from)?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::site_info::tests::{result_text, test_state};
    use sitemeta_core::AppConfig;
    use sitemeta_core::cache::CacheFileStatus;

    fn params(url: &str) -> CacheStatusParams {
        CacheStatusParams { url: url.to_string() }
    }

    #[tokio::test]
    async fn test_status_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path(), AppConfig::default()).await;

        let result = status_impl(&state, params("Example.com/page")).await.unwrap();
        let status: CacheFileStatus = serde_json::from_str(&result_text(&result)).unwrap();

        assert_eq!(status.host, "example.com");
        assert!(status.file_name.starts_with("example.com_"));
        assert!(status.file_name.ends_with(".txt"));
        assert!(!status.exists);
        assert_eq!(status.age_secs, None);
    }

    #[tokio::test]
    async fn test_status_existing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path(), AppConfig::default()).await;
        state.cache.set("https://example.com/", "{}").await.unwrap();

        let result = status_impl(&state, params("http://example.com/other")).await.unwrap();
        let status: CacheFileStatus = serde_json::from_str(&result_text(&result)).unwrap();

        assert!(status.exists);
        assert!(status.age_secs.unwrap() < 60);
        assert!(dir.path().join(&status.file_name).is_file());
    }

    #[tokio::test]
    async fn test_status_empty_url() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path(), AppConfig::default()).await;

        let result = status_impl(&state, params("")).await;
        assert_eq!(result.unwrap_err().code.0, -32602);
    }

    #[tokio::test]
    async fn test_status_invalid_url() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path(), AppConfig::default()).await;

        let result = status_impl(&state, params("not a url###")).await;
        assert_eq!(result.unwrap_err().code.0, -32003);
    }
}
