// Shared types for the output classifier
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Whether the email is registered at a given site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// `[+]` - account exists
    Exists,
    /// `[-]` - email not used
    NotUsed,
    /// `[x]` - site rate limited the check
    RateLimited,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Exists, Status::NotUsed, Status::RateLimited];

    /// Literal line prefix holehe prints for this status
    pub fn marker(self) -> &'static str {
        match self {
            Status::Exists => "[+]",
            Status::NotUsed => "[-]",
            Status::RateLimited => "[x]",
        }
    }

    /// Attribute value used in the emitted entities
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Exists => "exists",
            Status::NotUsed => "not_used",
            Status::RateLimited => "rate_limited",
        }
    }

    /// Split a status line into its status and the text after the marker
    pub fn split_marker(line: &str) -> Option<(Status, &str)> {
        Self::ALL
            .iter()
            .find_map(|status| line.strip_prefix(status.marker()).map(|rest| (*status, rest)))
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One site classification parsed from a status line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub domain: String,
    pub status: Status,
}

impl Finding {
    /// Deduplication key: lowercased domain plus status
    pub fn key(&self) -> (String, Status) {
        (self.domain.to_lowercase(), self.status)
    }
}

/// Per-status finding counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub exists: u32,
    pub not_used: u32,
    pub rate_limited: u32,
}

impl StatusCounts {
    pub fn increment(&mut self, status: Status) {
        match status {
            Status::Exists => self.exists += 1,
            Status::NotUsed => self.not_used += 1,
            Status::RateLimited => self.rate_limited += 1,
        }
    }

    pub fn get(&self, status: Status) -> u32 {
        match status {
            Status::Exists => self.exists,
            Status::NotUsed => self.not_used,
            Status::RateLimited => self.rate_limited,
        }
    }

    pub fn total(&self) -> u32 {
        self.exists + self.not_used + self.rate_limited
    }
}

/// Aggregate counts and timing for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub counts: StatusCounts,
    /// Sites holehe reports having checked
    pub checked_total: Option<u64>,
    /// Wall time holehe reports
    pub elapsed_seconds: Option<f64>,
}

/// Extra facts found in `Key : value` lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AncillaryFindings {
    /// Last `Twitter : <handle>` value seen
    pub twitter_handle: Option<String>,
    /// Absolute URLs, kept sorted and unique
    pub urls: BTreeSet<String>,
}

/// What a single trimmed line turned out to be
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind<'a> {
    /// Progress meter output
    Noise,
    /// "N websites checked in S seconds"
    Checked { checked: u64, seconds: f64 },
    /// `Key : value`
    KeyValue { key: &'a str, value: &'a str },
    /// `[+]`, `[-]` or `[x]` followed by a domain
    Status { status: Status, domain: &'a str },
    /// Anything else, dropped
    Unrecognized,
}

/// Statistics from one classification run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierStats {
    /// Non-empty lines scanned
    pub lines_seen: usize,
    /// Lines dropped as progress noise
    pub noise_discarded: usize,
    /// Status lines dropped as duplicates
    pub duplicates_dropped: usize,
    /// Lines matching no known shape
    pub unrecognized: usize,
}

/// Everything the classifier extracted from one captured output
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Unique findings in order of first appearance
    pub findings: Vec<Finding>,
    pub summary: SummaryRecord,
    pub ancillary: AncillaryFindings,
    pub stats: ClassifierStats,
}
