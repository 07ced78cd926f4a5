//! Pattern registry for classifying holehe output lines
//!
//! This module provides:
//! - Pattern configuration (serialized under `[patterns]` in config.toml)
//! - Pre-compiled regexes for the "websites checked" summary and `Key : value` lines
//! - Progress-meter noise patterns (tqdm bars and rate markers)
//!
//! Status markers (`[+]`, `[-]`, `[x]`) are literal prefixes and live in
//! `classifier::Status`, not here.

use crate::error::{HoleheError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Noise pattern configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoisePattern {
    pub name: String,
    pub pattern: String,
}

/// `[patterns]` configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatternsConfig {
    /// Must expose two capture groups: sites checked, then seconds elapsed
    pub checked_summary: String,
    /// Must expose two capture groups: key, then value
    pub key_value: String,
    #[serde(default)]
    pub noise: Vec<NoisePattern>,
}

impl Default for PatternsConfig {
    fn default() -> Self {
        Self {
            checked_summary: r"(?i)(\d+)\s+websites\s+checked\s+in\s+([\d.]+)\s+seconds"
                .to_string(),
            key_value: r"^([A-Za-z0-9 _-]+)\s*:\s*(.+)$".to_string(),
            noise: vec![
                NoisePattern {
                    name: "progress_bar_fill".to_string(),
                    pattern: "████".to_string(),
                },
                NoisePattern {
                    name: "progress_rate".to_string(),
                    pattern: r"it/s\]$".to_string(),
                },
                NoisePattern {
                    name: "progress_complete".to_string(),
                    pattern: r"^100%\|".to_string(),
                },
            ],
        }
    }
}

/// Compiled noise pattern
#[derive(Debug, Clone)]
pub struct CompiledNoisePattern {
    pub name: String,
    pub regex: Regex,
}

/// Totals parsed from the "N websites checked in S seconds" line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckedTotals {
    pub checked: u64,
    pub seconds: f64,
}

/// Pattern registry with all pre-compiled patterns
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    checked_summary: Regex,
    key_value: Regex,
    noise: Vec<CompiledNoisePattern>,
}

impl PatternRegistry {
    /// Build the registry from a parsed `[patterns]` section
    pub fn from_config(config: &PatternsConfig) -> Result<Self> {
        let checked_summary = compile("checked_summary", &config.checked_summary)?;
        let key_value = compile("key_value", &config.key_value)?;

        for (name, regex) in [("checked_summary", &checked_summary), ("key_value", &key_value)] {
            // group 0 is the whole match
            if regex.captures_len() < 3 {
                return Err(HoleheError::Config(format!(
                    "Pattern '{}' needs two capture groups",
                    name
                )));
            }
        }

        let noise = config
            .noise
            .iter()
            .map(|np| {
                compile(&np.name, &np.pattern).map(|regex| CompiledNoisePattern {
                    name: np.name.clone(),
                    regex,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            checked_summary,
            key_value,
            noise,
        })
    }

    /// Registry built from the default `[patterns]` section
    pub fn builtin() -> Result<Self> {
        Self::from_config(&PatternsConfig::default())
    }

    /// Name of the first noise pattern matching the line, if any
    pub fn noise_match(&self, line: &str) -> Option<&str> {
        self.noise
            .iter()
            .find(|p| p.regex.is_match(line))
            .map(|p| p.name.as_str())
    }

    /// Whether the line is progress-meter noise
    pub fn is_noise(&self, line: &str) -> bool {
        self.noise_match(line).is_some()
    }

    /// Parse the checked/elapsed totals anywhere in the line
    ///
    /// Returns `None` when the numbers do not parse, so the line can still be
    /// handled by the later stages.
    pub fn match_checked(&self, line: &str) -> Option<CheckedTotals> {
        let caps = self.checked_summary.captures(line)?;
        let checked = caps.get(1)?.as_str().parse().ok()?;
        let seconds = caps.get(2)?.as_str().parse().ok()?;
        Some(CheckedTotals { checked, seconds })
    }

    /// Split a `Key : value` line into its trimmed key and value
    pub fn match_key_value<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.key_value.captures(line)?;
        let key = caps.get(1)?.as_str().trim();
        let value = caps.get(2)?.as_str().trim();
        Some((key, value))
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| HoleheError::Config(format!("Invalid regex for pattern '{}': {}", name, e)))
}
