//! AUR package records.
//!
//! Field names follow the AUR RPC v5 wire format (`PascalCase`, with a few
//! upper-case acronyms). `search` responses decode into [`Package`]; `info`
//! responses decode into [`PackageInfo`], which adds the relationship lists.

use std::ops::Deref;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Package record returned by every RPC operation
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Package {
    #[serde(rename = "ID")]
    pub id: u64,
    pub name: String,
    #[serde(rename = "PackageBaseID")]
    pub package_base_id: u64,
    pub package_base: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Upstream project URL
    #[serde(rename = "URL", default)]
    pub url: Option<String>,
    #[serde(default)]
    pub num_votes: u64,
    #[serde(default)]
    pub popularity: f64,
    /// Set when the package was flagged out of date
    #[serde(default)]
    pub out_of_date: Option<OutOfDate>,
    /// Absent for orphaned packages
    #[serde(default)]
    pub maintainer: Option<String>,
    /// Unix epoch seconds
    pub first_submitted: i64,
    /// Unix epoch seconds
    pub last_modified: i64,
    /// Snapshot path relative to the AUR web root
    #[serde(rename = "URLPath", default)]
    pub url_path: Option<String>,
}

impl Package {
    /// Check if the package has no maintainer
    pub fn is_orphaned(&self) -> bool {
        self.maintainer.as_deref().map_or(true, str::is_empty)
    }

    /// Check if the package has been flagged out of date
    pub fn is_out_of_date(&self) -> bool {
        self.out_of_date.is_some()
    }

    pub fn first_submitted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.first_submitted, 0)
    }

    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.last_modified, 0)
    }

    /// Absolute snapshot tarball URL under `web_root` (e.g. `https://aur.archlinux.org`)
    pub fn snapshot_url(&self, web_root: &str) -> Option<String> {
        self.url_path
            .as_deref()
            .map(|path| format!("{}{}", web_root.trim_end_matches('/'), path))
    }
}

/// Raw "out of date" marker.
///
/// The service has reported this as a Unix timestamp, a string and a flag at
/// different times, so the value is kept as received. Any non-null value
/// means the package is flagged.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct OutOfDate(Value);

impl OutOfDate {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// The value exactly as the service sent it
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// When the package was flagged, if the marker is a Unix timestamp
    pub fn flagged_at(&self) -> Option<DateTime<Utc>> {
        let secs = match &self.0 {
            Value::Number(n) => n.as_i64()?,
            Value::String(s) => s.trim().parse().ok()?,
            _ => return None,
        };
        DateTime::from_timestamp(secs, 0)
    }
}

/// Package record with relationship lists, returned by `info` requests.
///
/// Lists keep the order the service returned them in.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageInfo {
    #[serde(flatten)]
    pub package: Package,
    #[serde(default)]
    pub depends: Vec<String>,
    #[serde(default)]
    pub make_depends: Vec<String>,
    #[serde(default)]
    pub opt_depends: Vec<String>,
    #[serde(default)]
    pub check_depends: Vec<String>,
    #[serde(default)]
    pub conflicts: Vec<String>,
    #[serde(default)]
    pub provides: Vec<String>,
    #[serde(default)]
    pub replaces: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub license: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Deref for PackageInfo {
    type Target = Package;

    fn deref(&self) -> &Package {
        &self.package
    }
}
