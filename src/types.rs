//! Core types for flexkids-dl

use serde::{Deserialize, Serialize};
use std::fmt;

/// Session cookie obtained once at login
///
/// Shared read-only by every stage for the lifetime of a run. The value is
/// never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredential {
    name: String,
    value: String,
}

impl SessionCredential {
    /// Create a credential from a cookie name and value
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Cookie name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cookie value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Value for a `Cookie` request header
    pub fn header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredential")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// A month for which the portal has an album
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PeriodKey {
    /// Calendar year
    pub year: i32,
    /// Calendar month (1-12 on a well-formed listing, not enforced)
    pub month: u32,
}

impl PeriodKey {
    /// Create a new PeriodKey
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Name of the output directory for this period, e.g. `2021-03`
    pub fn dir_name(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// One downloadable photo within a period
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PhotoRef {
    /// Period whose album listed this photo
    pub period: PeriodKey,
    /// Portal media identifier
    pub photo_id: u64,
}

impl PhotoRef {
    /// Create a new PhotoRef
    pub fn new(period: PeriodKey, photo_id: u64) -> Self {
        Self { period, photo_id }
    }

    /// File name of the photo, e.g. `101.jpg`
    pub fn file_name(&self) -> String {
        format!("{}.jpg", self.photo_id)
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.period, self.photo_id)
    }
}

/// Pipeline-wide lifecycle state
///
/// `Drained` is the only success terminal state. There is no retry or
/// cancellation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// Logging in
    Authenticating,
    /// Listing periods
    Enumerating,
    /// Album lookups and photo downloads running concurrently
    Harvesting,
    /// Every stage has exited
    Drained,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelineState::Authenticating => "authenticating",
            PipelineState::Enumerating => "enumerating",
            PipelineState::Harvesting => "harvesting",
            PipelineState::Drained => "drained",
        };
        f.write_str(s)
    }
}

/// Counters collected over one run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Periods emitted by the enumerator
    pub periods: u64,
    /// Album lookups that failed and were skipped
    pub albums_failed: u64,
    /// Photo references emitted by the album resolver
    pub photos_discovered: u64,
    /// Photos written to disk
    pub photos_saved: u64,
    /// Photos that failed to download or write
    pub photos_failed: u64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} periods, {} photos found, {} saved, {} failed ({} album lookups failed)",
            self.periods,
            self.photos_discovered,
            self.photos_saved,
            self.photos_failed,
            self.albums_failed
        )
    }
}
