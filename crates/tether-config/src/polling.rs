//! Polling session configuration.

use serde::{Deserialize, Serialize};

/// Default seconds between status checks.
const fn default_interval_secs() -> u64 {
    3
}

/// Default page size for the client-side fallback scan.
const fn default_scan_page_size() -> u32 {
    50
}

/// Default attempt count after which the CLI warns about a long-running job.
const fn default_warn_after_attempts() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollingConfig {
    /// Fixed interval between status checks, in seconds.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// How many recent result rows the fallback scan fetches.
    #[serde(default = "default_scan_page_size")]
    pub scan_page_size: u32,

    /// Soft-timeout attempt count. The session itself never times out; the
    /// caller layers a warning on top of the attempt counter.
    #[serde(default = "default_warn_after_attempts")]
    pub warn_after_attempts: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            scan_page_size: default_scan_page_size(),
            warn_after_attempts: default_warn_after_attempts(),
        }
    }
}
