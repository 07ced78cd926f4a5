use crate::config::Config;
use crate::error::{HoleheError, Result, ValidationError};
use crate::patterns::PatternRegistry;

/// Upper bound on the holehe timeout, in seconds
const MAX_TIMEOUT_SECS: u64 = 3600;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration, collecting every problem found
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_tool(config, &mut errors);
        Self::validate_output(config, &mut errors);
        Self::validate_patterns(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(HoleheError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_tool(config: &Config, errors: &mut Vec<ValidationError>) {
        let timeout = config.tool.timeout_secs;
        if timeout == 0 || timeout > MAX_TIMEOUT_SECS {
            errors.push(ValidationError::new(
                "tool.timeout_secs",
                format!(
                    "Timeout must be between 1 and {} seconds, got {}",
                    MAX_TIMEOUT_SECS, timeout
                ),
            ));
        }

        if config.tool.relative_path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "tool.relative_path",
                "Relative binary path cannot be empty",
            ));
        }

        if let Some(binary) = &config.tool.binary {
            if binary.as_os_str().is_empty() {
                errors.push(ValidationError::new(
                    "tool.binary",
                    "Binary path cannot be empty when set",
                ));
            }
        }
    }

    fn validate_output(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.output.source.trim().is_empty() {
            errors.push(ValidationError::new(
                "output.source",
                "Source label cannot be empty",
            ));
        }
    }

    fn validate_patterns(config: &Config, errors: &mut Vec<ValidationError>) {
        if let Err(e) = PatternRegistry::from_config(&config.patterns) {
            errors.push(ValidationError::new("patterns", e.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default();
        config.tool.timeout_secs = 0;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_empty_relative_path() {
        let mut config = Config::default();
        config.tool.relative_path = PathBuf::new();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = Config::default();
        config.meta.schema_version = "0.1.0".to_string();
        config.output.source = " ".to_string();
        config.patterns.checked_summary = "(".to_string();

        match ConfigValidator::validate(&config) {
            Err(HoleheError::ConfigValidation { errors }) => {
                let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
                assert_eq!(paths, vec!["_meta.schema_version", "output.source", "patterns"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
