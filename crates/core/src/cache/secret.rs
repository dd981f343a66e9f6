//! Persisted secret for cache file hashing.
//!
//! The secret is generated once per cache directory and reused by every
//! later process, so entries written before a restart stay readable.

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use super::store::temp_path;
use crate::Error;

/// Name of the secret file inside the cache directory.
pub const SECRET_FILE: &str = ".secret";

/// Secret used to key the host hash.
#[derive(Clone, PartialEq, Eq)]
pub struct CacheSecret(String);

impl CacheSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Use `configured` when given; otherwise read `dir/.secret`, creating it
    /// with a fresh random secret when it does not exist yet.
    ///
    /// Creation goes through a temp file and a hard link so the secret file
    /// only ever appears fully written. If another process wins the race its
    /// secret is adopted.
    pub async fn load_or_create(dir: &Path, configured: Option<&str>) -> Result<Self, Error> {
        if let Some(secret) = configured.filter(|s| !s.is_empty()) {
            return Ok(Self::new(secret));
        }

        let path = dir.join(SECRET_FILE);
        if let Some(secret) = read_secret(&path).await? {
            return Ok(secret);
        }

        let generated = hex::encode(rand::random::<[u8; 16]>());
        let tmp = temp_path(&path);
        tokio::fs::write(&tmp, &generated)
            .await
            .map_err(|e| Error::CacheIo(format!("failed to write {}: {e}", tmp.display())))?;

        let linked = tokio::fs::hard_link(&tmp, &path).await;
        let _ = tokio::fs::remove_file(&tmp).await;

        match linked {
            Ok(()) => {
                tracing::info!(path = %path.display(), "generated cache secret");
                Ok(Self::new(generated))
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => read_secret(&path)
                .await?
                .ok_or_else(|| Error::CacheIo(format!("{} is empty", path.display()))),
            Err(e) => Err(Error::CacheIo(format!("failed to persist {}: {e}", path.display()))),
        }
    }
}

async fn read_secret(path: &Path) -> Result<Option<CacheSecret>, Error> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => {
            let trimmed = contents.trim();
            Ok((!trimmed.is_empty()).then(|| CacheSecret::new(trimmed)))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::CacheIo(format!("failed to read {}: {e}", path.display()))),
    }
}

impl fmt::Debug for CacheSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CacheSecret(..)")
    }
}
