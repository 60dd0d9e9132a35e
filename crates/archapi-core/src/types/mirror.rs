//! Mirror status feed records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mirror status document
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MirrorList {
    /// Age in seconds after which the service stops scoring a mirror
    pub cutoff: u64,
    pub last_check: DateTime<Utc>,
    pub num_checks: u64,
    /// Seconds between checks
    pub check_frequency: u64,
    /// Mirrors in the order the service listed them
    pub urls: Vec<Mirror>,
    pub version: u32,
}

/// One mirror URL and its sync statistics.
///
/// Statistics are `None` for mirrors that never synced within the cutoff.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Mirror {
    pub url: String,
    pub protocol: String,
    pub last_sync: Option<DateTime<Utc>>,
    pub completion_pct: Option<f64>,
    /// Seconds behind the master mirror
    pub delay: Option<i64>,
    pub duration_avg: Option<f64>,
    pub duration_stddev: Option<f64>,
    /// Lower is better
    pub score: Option<f64>,
    pub active: bool,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub country_code: String,
    pub isos: bool,
    pub ipv4: bool,
    pub ipv6: bool,
    /// Free-text notes, often the reason a mirror is inactive
    #[serde(default)]
    pub details: String,
}

impl Mirror {
    /// Check the ISO country code (case-insensitive)
    pub fn in_country(&self, code: &str) -> bool {
        self.country_code.eq_ignore_ascii_case(code)
    }

    /// Check the URL scheme (case-insensitive)
    pub fn serves(&self, protocol: &str) -> bool {
        self.protocol.eq_ignore_ascii_case(protocol)
    }
}
