//! Site information returned for a lookup.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Metadata and favicon for one site.
///
/// Built once per lookup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SiteInfo {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub canonical: String,
    pub favicon_url: String,
    /// Origin URL (`scheme://host[:port]`) the lookup resolved to.
    pub host: String,
    pub performance: Performance,
}

/// Timing and memory figures for a lookup, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Performance {
    /// Seconds with three decimals, e.g. `0.412s`.
    pub time_spent: String,
    /// Resident memory in MiB with two decimals, e.g. `3.75MB`.
    pub memory_usage: String,
}

impl Performance {
    /// Capture the elapsed time and the current resident memory.
    pub fn measure(elapsed: Duration) -> Self {
        Self::from_parts(elapsed, resident_memory_bytes())
    }

    fn from_parts(elapsed: Duration, memory_bytes: u64) -> Self {
        let mib = memory_bytes as f64 / 1024.0 / 1024.0;
        Self { time_spent: format!("{:.3}s", elapsed.as_secs_f64()), memory_usage: format!("{mib:.2}MB") }
    }
}

/// Response envelope serialized to clients and stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SiteInfoResponse {
    pub success: bool,
    pub data: SiteInfo,
}

impl From<SiteInfo> for SiteInfoResponse {
    fn from(data: SiteInfo) -> Self {
        Self { success: true, data }
    }
}

/// Resident set size of this process, or 0 where it cannot be read.
#[cfg(target_os = "linux")]
fn resident_memory_bytes() -> u64 {
    let Ok(status) = std::fs::read_to_string("/proc/self/status") else {
        return 0;
    };
    status
        .lines()
        .find_map(|line| line.strip_prefix("VmRSS:"))
        .and_then(|rest| rest.trim().trim_end_matches("kB").trim().parse::<u64>().ok())
        .map(|kb| kb * 1024)
        .unwrap_or(0)
}

#[cfg(not(target_os = "linux"))]
fn resident_memory_bytes() -> u64 {
    0
}
