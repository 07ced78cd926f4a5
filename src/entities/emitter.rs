//! Entity emission from a classification
//!
//! Output order is fixed: findings, the summary, the twitter handle, URLs
//! (sorted), then the "no domains" fallback when nothing was found.

use crate::classifier::{Classification, Finding, Status, SummaryRecord};
use crate::entities::{EntityKind, OutputEntity};
use std::path::PathBuf;

/// Reasons a run ends with a single explanatory entity
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Identifier missing or blank
    NoInput,
    /// holehe executable absent
    BinaryNotFound(PathBuf),
    /// Spawn failure or timeout
    ExecutionError(String),
    /// Configuration could not be loaded
    ConfigurationError(String),
}

impl Diagnostic {
    pub fn message(&self) -> String {
        match self {
            Diagnostic::NoInput => "HOLEHE: No email provided".to_string(),
            Diagnostic::BinaryNotFound(path) => {
                format!("HOLEHE: binary not found: {}", path.display())
            }
            Diagnostic::ExecutionError(detail) => format!("HOLEHE: execution error: {}", detail),
            Diagnostic::ConfigurationError(detail) => {
                format!("HOLEHE: configuration error: {}", detail)
            }
        }
    }

    pub fn into_entity(self) -> OutputEntity {
        OutputEntity::phrase(self.message())
    }
}

/// Builds the ordered entity list for one email
pub struct EntityEmitter {
    /// Value of the `source` field on every entity
    source: String,
}

impl EntityEmitter {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Emit every entity for a classified run
    pub fn emit(&self, email: &str, classification: &Classification) -> Vec<OutputEntity> {
        let mut entities: Vec<OutputEntity> = classification
            .findings
            .iter()
            .map(|finding| self.finding_entity(email, finding))
            .collect();

        entities.push(self.summary_entity(email, &classification.summary));

        if let Some(handle) = &classification.ancillary.twitter_handle {
            entities.push(
                OutputEntity::phrase(format!("Twitter handle: {}", handle))
                    .with_field("source", &self.source)
                    .with_field("platform", "twitter")
                    .with_field("input_email", email),
            );
        }

        // BTreeSet iteration is already lexicographic
        for url in &classification.ancillary.urls {
            entities.push(
                OutputEntity::new(EntityKind::Url, url)
                    .with_field("source", &self.source)
                    .with_field("input_email", email),
            );
        }

        if classification.summary.counts.total() == 0 {
            entities.push(
                OutputEntity::phrase(format!(
                    "HOLEHE executed but no domains were parsed for {}",
                    email
                ))
                .with_field("source", &self.source),
            );
        }

        entities
    }

    fn finding_entity(&self, email: &str, finding: &Finding) -> OutputEntity {
        OutputEntity::new(EntityKind::Website, &finding.domain)
            .with_field("status", finding.status)
            .with_field("source", &self.source)
            .with_field("input_email", email)
    }

    fn summary_entity(&self, email: &str, summary: &SummaryRecord) -> OutputEntity {
        let counts = &summary.counts;
        let seconds = summary.elapsed_seconds.map(|s| format!("{:.2}", s));

        let mut parts = vec![format!("HOLEHE Summary for {}", email)];
        parts.extend(
            Status::ALL
                .iter()
                .map(|status| format!("{}={}", status, counts.get(*status))),
        );
        if let (Some(checked), Some(seconds)) = (summary.checked_total, &seconds) {
            parts.push(format!("checked={}", checked));
            parts.push(format!("seconds={}", seconds));
        }

        OutputEntity::phrase(parts.join(" | "))
            .with_field("exists", counts.exists)
            .with_field("not_used", counts.not_used)
            .with_field("rate_limited", counts.rate_limited)
            .with_field(
                "checked",
                summary
                    .checked_total
                    .map(|c| c.to_string())
                    .unwrap_or_default(),
            )
            .with_field("seconds", seconds.unwrap_or_default())
            .with_field("source", &self.source)
    }
}
