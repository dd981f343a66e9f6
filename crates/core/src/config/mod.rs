//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SITEMETA_*)
//! 2. TOML config file (if SITEMETA_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SITEMETA_*)
/// 2. TOML config file (if SITEMETA_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the host cache files.
    ///
    /// Set via SITEMETA_CACHE_DIR environment variable.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Secret for the cache file hash.
    ///
    /// Set via SITEMETA_CACHE_SECRET. When absent, a secret is generated once
    /// and persisted in the cache directory.
    #[serde(default)]
    pub cache_secret: Option<String>,

    /// Lifetime of a cache entry in seconds.
    ///
    /// Set via SITEMETA_CACHE_EXPIRE_SECS environment variable.
    #[serde(default = "default_cache_expire_secs")]
    pub cache_expire_secs: u64,

    /// MD5 hex digest of a placeholder result. Entries with this digest
    /// expire after 12 hours. Empty disables the check.
    #[serde(default)]
    pub placeholder_digest: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via SITEMETA_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via SITEMETA_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of redirects to follow per request.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Maximum bytes to fetch per request.
    ///
    /// Set via SITEMETA_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Skip TLS certificate and hostname verification.
    #[serde(default = "default_true")]
    pub accept_invalid_certs: bool,

    /// Whether to extract title, description, keywords and canonical.
    #[serde(default = "default_true")]
    pub fetch_meta: bool,

    /// Longest accepted request URL.
    #[serde(default = "default_max_url_length")]
    pub max_url_length: usize,

    /// Domain allowlist for lookups. Empty allows every domain.
    ///
    /// Set via SITEMETA_ALLOWLIST_DOMAINS environment variable.
    #[serde(default)]
    pub allowlist_domains: Vec<String>,

    /// Prefix of the third-party favicon service; the origin is appended.
    #[serde(default = "default_fallback_service_url")]
    pub fallback_service_url: String,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./cache")
}

fn default_cache_expire_secs() -> u64 {
    2_592_000 // 30 days
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; FaviconFetcher/3.0)".into()
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_max_redirects() -> usize {
    3
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_true() -> bool {
    true
}

fn default_max_url_length() -> usize {
    512
}

fn default_fallback_service_url() -> String {
    "https://t3.gstatic.com/faviconV2?client=SOCIAL&type=FAVICON&url=".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            cache_secret: None,
            cache_expire_secs: default_cache_expire_secs(),
            placeholder_digest: String::new(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
            max_bytes: default_max_bytes(),
            accept_invalid_certs: true,
            fetch_meta: true,
            max_url_length: default_max_url_length(),
            allowlist_domains: Vec::new(),
            fallback_service_url: default_fallback_service_url(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache expiry as Duration.
    pub fn cache_expire(&self) -> Duration {
        Duration::from_secs(self.cache_expire_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `SITEMETA_`
    /// 2. TOML file from `SITEMETA_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SITEMETA_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("SITEMETA_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check whether a host is covered by the allowlist.
    ///
    /// An empty allowlist admits every host; otherwise the host must equal an
    /// entry or be a subdomain of one.
    pub fn is_domain_allowed(&self, host: &str) -> bool {
        if self.allowlist_domains.is_empty() {
            return true;
        }
        let host = host.to_ascii_lowercase();
        self.allowlist_domains.iter().any(|domain| {
            let domain = domain.trim().to_ascii_lowercase();
            host == domain || host.ends_with(&format!(".{domain}"))
        })
    }
}
