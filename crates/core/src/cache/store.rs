//! File-backed host cache.
//!
//! One file per host in a flat directory, named `{host}_{hash}.txt`. The file
//! modification time is the only expiry signal; stale files are left on disk
//! and overwritten by the next write.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::hash::{cache_file_name, cache_host, content_digest};
use super::secret::CacheSecret;
use crate::Error;

/// Expiry applied to entries whose content matches the placeholder digest.
pub const PLACEHOLDER_EXPIRE: Duration = Duration::from_secs(12 * 60 * 60);

/// Cache handle rooted at a directory.
#[derive(Clone, Debug)]
pub struct HostCache {
    dir: PathBuf,
    secret: CacheSecret,
}

/// Where a key's entry lives and how old it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CacheFileStatus {
    pub host: String,
    pub file_name: String,
    pub exists: bool,
    pub age_secs: Option<u64>,
    /// RFC 3339 modification time of the entry.
    pub modified_at: Option<String>,
}

impl HostCache {
    /// Open the cache at `dir`, creating it recursively.
    ///
    /// A directory that cannot be created is an unrecoverable deployment
    /// problem and is reported as `Error::CacheDir`.
    pub async fn open(dir: impl AsRef<Path>, configured_secret: Option<&str>) -> Result<Self, Error> {
        let dir = dir.as_ref().to_path_buf();
        ensure_dir(&dir).await?;
        let secret = CacheSecret::load_or_create(&dir, configured_secret).await?;
        Ok(Self { dir, secret })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the entry for `key`, or `None` when no host can be derived.
    pub fn path_for(&self, key: &str) -> Option<PathBuf> {
        let host = cache_host(key)?;
        Some(self.dir.join(cache_file_name(&host, self.secret.as_str())))
    }

    /// Read the entry for `key` if it is younger than `expire`.
    ///
    /// When `placeholder_digest` is non-empty and equals the MD5 digest of the
    /// content, the expiry becomes [`PLACEHOLDER_EXPIRE`] instead.
    pub async fn get(&self, key: &str, placeholder_digest: &str, expire: Duration) -> Result<Option<String>, Error> {
        let Some(path) = self.path_for(key) else {
            return Ok(None);
        };

        let data = match tokio::fs::read_to_string(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::CacheIo(format!("failed to read {}: {e}", path.display()))),
        };

        let expire = if !placeholder_digest.is_empty() && content_digest(data.as_bytes()) == placeholder_digest {
            PLACEHOLDER_EXPIRE
        } else {
            expire
        };

        let age = file_age(&path).await?;
        if age > expire {
            tracing::debug!(path = %path.display(), age_secs = age.as_secs(), "cache entry expired");
            return Ok(None);
        }

        Ok(Some(data))
    }

    /// Store `value` for the host of `key`.
    ///
    /// The value is written to a temp file in the cache directory and renamed
    /// over the entry, so readers see either the old or the new content.
    /// Keys without a host are ignored.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        ensure_dir(&self.dir).await?;

        let Some(path) = self.path_for(key) else {
            tracing::debug!(key, "no host in cache key, skipping write");
            return Ok(());
        };

        let tmp = temp_path(&path);
        if let Err(e) = tokio::fs::write(&tmp, value).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(Error::CacheIo(format!("failed to write {}: {e}", tmp.display())));
        }

        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(Error::CacheIo(format!("failed to replace {}: {e}", path.display())));
        }

        tracing::info!(path = %path.display(), bytes = value.len(), "cache entry written");
        Ok(())
    }

    /// Describe the entry for `key` without reading its content.
    pub async fn status(&self, key: &str) -> Result<Option<CacheFileStatus>, Error> {
        let Some(host) = cache_host(key) else {
            return Ok(None);
        };
        let file_name = cache_file_name(&host, self.secret.as_str());
        let path = self.dir.join(&file_name);

        let modified = match tokio::fs::metadata(&path).await.and_then(|m| m.modified()) {
            Ok(modified) => Some(modified),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(Error::CacheIo(format!("failed to stat {}: {e}", path.display()))),
        };

        let age_secs = modified.map(|m| SystemTime::now().duration_since(m).unwrap_or_default().as_secs());
        let modified_at = modified.map(|m| DateTime::<Utc>::from(m).to_rfc3339());

        Ok(Some(CacheFileStatus { host, file_name, exists: modified.is_some(), age_secs, modified_at }))
    }
}

async fn ensure_dir(dir: &Path) -> Result<(), Error> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| Error::CacheDir(format!("failed to create {}: {e}", dir.display())))
}

/// Age of a file by modification time; a future mtime counts as zero.
async fn file_age(path: &Path) -> Result<Duration, Error> {
    let modified = tokio::fs::metadata(path)
        .await
        .and_then(|m| m.modified())
        .map_err(|e| Error::CacheIo(format!("failed to stat {}: {e}", path.display())))?;
    Ok(SystemTime::now().duration_since(modified).unwrap_or_default())
}

/// Sibling temp path, unique per call.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("entry");
    let suffix = hex::encode(rand::random::<[u8; 6]>());
    path.with_file_name(format!(".{name}.{suffix}.tmp"))
}
