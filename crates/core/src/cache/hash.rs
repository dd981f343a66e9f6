//! Host-keyed cache file naming.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::origin::ensure_scheme;

type HmacSha256 = Hmac<Sha256>;

/// Derive the cache host for a key: scheme defaulted, host lowercased.
///
/// Only the host matters, so every path on a site maps to one entry.
pub fn cache_host(key: &str) -> Option<String> {
    let url = url::Url::parse(&ensure_scheme(key)).ok()?;
    url.host_str().map(str::to_lowercase)
}

/// Keyed hash of a host: hex HMAC-SHA256, characters 8..24.
pub fn host_hash(host: &str, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(host.as_bytes());
    let digest = hex::encode(mac.finalize().into_bytes());
    digest[8..24].to_string()
}

/// File name for a host's cache entry: `{host}_{hash}.txt`.
pub fn cache_file_name(host: &str, secret: &str) -> String {
    format!("{host}_{}.txt", host_hash(host, secret))
}

/// MD5 hex digest of cached content, compared against the placeholder marker.
pub fn content_digest(data: &[u8]) -> String {
    format!("{:x}", md5::compute(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_host_ignores_path_and_case() {
        assert_eq!(cache_host("https://Example.COM/a/b?c=d").as_deref(), Some("example.com"));
        assert_eq!(cache_host("example.com/other").as_deref(), Some("example.com"));
    }

    #[test]
    fn test_cache_host_missing() {
        assert_eq!(cache_host(""), None);
        assert_eq!(cache_host("http://"), None);
    }

    #[test]
    fn test_host_hash_stability() {
        let hash1 = host_hash("example.com", "secret");
        let hash2 = host_hash("example.com", "secret");
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_host_hash_depends_on_secret() {
        assert_ne!(host_hash("example.com", "one"), host_hash("example.com", "two"));
    }

    #[test]
    fn test_host_hash_format() {
        let hash = host_hash("example.com", "secret");
        assert_eq!(hash.len(), 16);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_host_hash_is_hmac_slice() {
        // RFC 4231 test case 2: key "Jefe", data "what do ya want for nothing?"
        let full = "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843";
        assert_eq!(host_hash("what do ya want for nothing?", "Jefe"), &full[8..24]);
    }

    #[test]
    fn test_cache_file_name() {
        let name = cache_file_name("example.com", "secret");
        assert!(name.starts_with("example.com_"));
        assert!(name.ends_with(".txt"));
        assert_eq!(name.len(), "example.com_".len() + 16 + ".txt".len());
    }

    #[test]
    fn test_content_digest() {
        assert_eq!(content_digest(b""), "d41d8cd98f00b204e9800998ecf8427e");
    }
}
