//! Output classifier
//!
//! Turns the text holehe printed into findings, summary totals and ancillary
//! facts. Each trimmed line goes through, in order:
//! 1. Noise check (progress bars) - dropped
//! 2. "N websites checked in S seconds" - totals recorded
//! 3. `Key : value` - twitter handle and absolute URLs recorded
//! 4. `[+]` / `[-]` / `[x]` literal prefix - finding, deduplicated
//!
//! Anything else is dropped. Classification never fails.

mod types;

pub use types::{
    AncillaryFindings, Classification, ClassifierStats, Finding, LineKind, Status, StatusCounts,
    SummaryRecord,
};

use crate::patterns::PatternRegistry;
use ahash::{HashSet, HashSetExt};
use std::sync::Arc;

/// Stateless line classifier backed by the pattern registry
pub struct OutputClassifier {
    patterns: Arc<PatternRegistry>,
}

impl OutputClassifier {
    pub fn new(patterns: Arc<PatternRegistry>) -> Self {
        Self { patterns }
    }

    /// Decide what a single trimmed, non-empty line is
    pub fn classify_line<'a>(&self, line: &'a str) -> LineKind<'a> {
        if self.patterns.is_noise(line) {
            return LineKind::Noise;
        }

        if let Some(totals) = self.patterns.match_checked(line) {
            return LineKind::Checked {
                checked: totals.checked,
                seconds: totals.seconds,
            };
        }

        if let Some((key, value)) = self.patterns.match_key_value(line) {
            return LineKind::KeyValue { key, value };
        }

        match Status::split_marker(line) {
            Some((status, rest)) => {
                let domain = rest.trim();
                if domain.is_empty() {
                    LineKind::Unrecognized
                } else {
                    LineKind::Status { status, domain }
                }
            }
            None => LineKind::Unrecognized,
        }
    }

    /// Classify the full captured output of one holehe run
    pub fn classify(&self, output: &str) -> Classification {
        let mut result = Classification::default();
        let mut seen: HashSet<(String, Status)> = HashSet::new();

        for line in split_lines(output).map(str::trim).filter(|l| !l.is_empty()) {
            result.stats.lines_seen += 1;

            match self.classify_line(line) {
                LineKind::Noise => result.stats.noise_discarded += 1,
                LineKind::Checked { checked, seconds } => {
                    result.summary.checked_total = Some(checked);
                    result.summary.elapsed_seconds = Some(seconds);
                }
                LineKind::KeyValue { key, value } => {
                    if key.eq_ignore_ascii_case("twitter") {
                        result.ancillary.twitter_handle = Some(value.to_string());
                    }
                    if is_absolute_url(value) {
                        result.ancillary.urls.insert(value.to_string());
                    }
                }
                LineKind::Status { status, domain } => {
                    let finding = Finding {
                        domain: domain.to_string(),
                        status,
                    };
                    if !seen.insert(finding.key()) {
                        result.stats.duplicates_dropped += 1;
                        continue;
                    }
                    result.summary.counts.increment(status);
                    result.findings.push(finding);
                }
                LineKind::Unrecognized => {
                    tracing::trace!("Dropping unrecognized line: {}", line);
                    result.stats.unrecognized += 1;
                }
            }
        }

        tracing::debug!(
            "Classified {} lines: {} findings, {} noise, {} duplicates, {} unrecognized",
            result.stats.lines_seen,
            result.findings.len(),
            result.stats.noise_discarded,
            result.stats.duplicates_dropped,
            result.stats.unrecognized
        );

        result
    }
}

/// Split on every line boundary, including the bare `\r` progress meters
/// redraw with and the Unicode separators
fn split_lines(output: &str) -> impl Iterator<Item = &str> {
    output.split(|c: char| {
        matches!(
            c,
            '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}'..='\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
        )
    })
}

fn is_absolute_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
