//! Scheme defaulting shared by the request handler and the host cache.

/// Prefix `http://` to inputs that do not already start with `http://` or
/// `https://` (case-insensitive). Leading slashes are dropped first.
pub fn ensure_scheme(input: &str) -> String {
    if has_http_scheme(input) { input.to_string() } else { format!("http://{}", input.trim_start_matches('/')) }
}

fn has_http_scheme(input: &str) -> bool {
    let starts_with = |prefix: &str| input.get(..prefix.len()).is_some_and(|p| p.eq_ignore_ascii_case(prefix));
    starts_with("http://") || starts_with("https://")
}
