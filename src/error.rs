use std::path::PathBuf;
use thiserror::Error;

/// Main error type for holehe-maltego
#[derive(Error, Debug)]
pub enum HoleheError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation errors
    #[error("Configuration validation failed: {errors:?}")]
    ConfigValidation { errors: Vec<ValidationError> },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Invalid configuration value
    #[error("Invalid configuration value at {path}: {message}")]
    InvalidConfigValue { path: String, message: String },

    /// The holehe executable is not where we expect it
    #[error("binary not found: {}", path.display())]
    BinaryNotFound { path: PathBuf },

    /// Spawning or waiting on holehe failed
    #[error("{source}")]
    Execution {
        source: std::io::Error,
        binary: PathBuf,
    },

    /// holehe did not finish in time
    #[error("Command '{}' timed out after {seconds} seconds", binary.display())]
    Timeout { binary: PathBuf, seconds: u64 },

    /// Malformed transform request message
    #[error("Invalid transform request: {0}")]
    Request(String),

    /// XML serialization errors
    #[error("XML error: {0}")]
    Xml(String),

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    /// JSON errors
    #[error("JSON error: {context}: {source}")]
    Json {
        source: serde_json::Error,
        context: String,
    },

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Path to the configuration key that failed validation
    pub path: String,
    /// Error message describing the validation failure
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for holehe-maltego operations
pub type Result<T> = std::result::Result<T, HoleheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_not_found_message_names_path() {
        let err = HoleheError::BinaryNotFound {
            path: PathBuf::from("/opt/holehe-maltego/venv/bin/holehe"),
        };
        assert_eq!(
            err.to_string(),
            "binary not found: /opt/holehe-maltego/venv/bin/holehe"
        );
    }

    #[test]
    fn test_timeout_message() {
        let err = HoleheError::Timeout {
            binary: PathBuf::from("holehe"),
            seconds: 180,
        };
        assert_eq!(
            err.to_string(),
            "Command 'holehe' timed out after 180 seconds"
        );
    }
}
