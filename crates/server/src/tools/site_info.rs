//! site_info tool implementation.
//!
//! Serves a site's metadata and favicon from the host cache, or looks it up
//! and stores the result.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sitemeta_core::{Error, SiteInfoResponse, cache::cache_host, ensure_scheme};

use crate::state::AppState;

/// Input parameters for site_info tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SiteInfoParams {
    /// The page URL or bare host to look up.
    pub url: String,

    /// Only resolve the favicon; skip title, description, keywords and canonical.
    #[serde(default)]
    pub favicon_only: bool,

    /// Bypass the cache and look the site up again.
    #[serde(default)]
    pub refresh: bool,
}

/// Implementation of the site_info tool.
pub async fn site_info_impl(state: &AppState, params: SiteInfoParams) -> Result<CallToolResult, McpError> {
    let raw = params.url.trim();
    if raw.is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    if raw.chars().count() > state.config.max_url_length {
        return Err(Error::InvalidInput(format!("url exceeds {} characters", state.config.max_url_length)).into());
    }

    let url = ensure_scheme(raw);
    let host = cache_host(&url).ok_or_else(|| Error::InvalidUrl(url.clone()))?;

    if !state.config.is_domain_allowed(&host) {
        return Err(Error::DomainNotAllowed(host).into());
    }

    if !params.refresh {
        match state
            .cache
            .get(&url, &state.config.placeholder_digest, state.config.cache_expire())
            .await
        {
            Ok(Some(cached)) => {
                tracing::debug!("cache hit for {}", host);
                return Ok(CallToolResult::success(vec![Content::text(cached)]));
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("failed to read cache entry for {}, refetching: {}", host, e),
        }
    }

    let fetch_meta = state.config.fetch_meta && !params.favicon_only;
    let lookup = state.service.lookup(&url, fetch_meta).await?;
    let body = serde_json::to_string_pretty(&SiteInfoResponse::from(lookup.info)).map_err(Error::from)?;

    match state.cache.set(&url, &body).await {
        Ok(()) => {}
        Err(e @ Error::CacheDir(_)) => {
            tracing::error!("cache directory unavailable: {}", e);
            return Err(e.into());
        }
        Err(e) => tracing::warn!("failed to cache result for {}: {}", host, e),
    }

    Ok(CallToolResult::success(vec![Content::text(body)]))
}
