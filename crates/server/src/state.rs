//! Shared server state.

use sitemeta_client::SiteInfoService;
use sitemeta_core::{AppConfig, Error, HostCache};

/// Configuration, cache and lookup service shared by all tool calls.
pub struct AppState {
    pub config: AppConfig,
    pub cache: HostCache,
    pub service: SiteInfoService,
}

impl AppState {
    /// Open the cache directory and build the HTTP client.
    ///
    /// # Errors
    ///
    /// `Error::CacheDir` when the cache directory cannot be created; the
    /// server must not start without it.
    pub async fn init(config: AppConfig) -> Result<Self, Error> {
        let cache = HostCache::open(&config.cache_dir, config.cache_secret.as_deref()).await?;
        let service = SiteInfoService::from_config(&config)?;
        Ok(Self { config, cache, service })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_creates_cache_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig { cache_dir: dir.path().join("cache"), ..Default::default() };

        let state = AppState::init(config).await.unwrap();

        assert!(state.cache.dir().is_dir());
        assert!(state.cache.dir().join(".secret").is_file());
    }

    #[tokio::test]
    async fn test_init_fails_without_cache_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, "x").unwrap();
        let config = AppConfig { cache_dir: file.join("cache"), ..Default::default() };

        let result = AppState::init(config).await;

        assert!(matches!(result, Err(Error::CacheDir(_))));
    }
}
