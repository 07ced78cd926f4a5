//! Configuration management for holehe-maltego
//!
//! Precedence, lowest to highest: built-in defaults, config.toml,
//! `HOLEHE_MALTEGO_*` environment variables, command-line flags.

use crate::error::{HoleheError, Result};
use crate::patterns::PatternsConfig;
use crate::transport::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Prefix of environment overrides, e.g. `HOLEHE_MALTEGO_TOOL__TIMEOUT_SECS=120`
pub const ENV_PREFIX: &str = "HOLEHE_MALTEGO_";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    pub tool: ToolConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub patterns: PatternsConfig,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Where holehe lives and how long it may run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Explicit binary path; relative paths resolve against the deployment root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<PathBuf>,
    /// Binary location under the deployment root when `binary` is unset
    pub relative_path: PathBuf,
    pub timeout_secs: u64,
}

/// Response document settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Value of the `source` field on emitted entities
    pub source: String,
    #[serde(default)]
    pub format: OutputFormat,
}

/// Settings given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub binary: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub format: Option<OutputFormat>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HoleheError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| HoleheError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();

        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Load from `path` (or the default location), falling back to defaults
    /// when the file does not exist
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            tracing::debug!("Config file {:?} not found, using defaults", path);
            let mut config = Config::default();
            config.apply_env_overrides();
            ConfigValidator::validate(&config)?;
            return Ok(config);
        }

        Self::load(&path)
    }

    /// Load as `load_or_default` does, then apply command-line overrides and
    /// validate the result again
    pub fn load_with_overrides(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = Self::load_or_default(path)?;
        config.apply_overrides(overrides);
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(binary) = &overrides.binary {
            self.tool.binary = Some(binary.clone());
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.tool.timeout_secs = timeout;
        }
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| HoleheError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: HOLEHE_MALTEGO_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix(ENV_PREFIX) {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "TOOL__BINARY" => {
                self.tool.binary = Some(PathBuf::from(value));
            }
            "TOOL__TIMEOUT_SECS" => {
                self.tool.timeout_secs =
                    value.parse().map_err(|_| HoleheError::InvalidConfigValue {
                        path: path.to_string(),
                        message: format!("Cannot parse '{}' as seconds", value),
                    })?;
            }
            "OUTPUT__FORMAT" => {
                self.output.format = value.parse()?;
            }
            "OUTPUT__SOURCE" => {
                self.output.source = value.to_string();
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Absolute location of the holehe executable
    ///
    /// Without an explicit `tool.binary`, this is `relative_path` under the
    /// deployment root (the parent of the directory holding this executable).
    pub fn resolve_binary(&self) -> Result<PathBuf> {
        let candidate = match &self.tool.binary {
            Some(binary) => expand_tilde(binary),
            None => self.tool.relative_path.clone(),
        };

        if candidate.is_absolute() {
            return Ok(candidate);
        }

        Ok(deployment_root()?.join(candidate))
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HoleheError::Config("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("holehe-maltego").join("config.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta: MetaConfig {
                schema_version: "1.0.0".to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            tool: ToolConfig {
                binary: None,
                relative_path: PathBuf::from("venv").join("bin").join("holehe"),
                timeout_secs: 180,
            },
            output: OutputConfig {
                source: "holehe".to_string(),
                format: OutputFormat::Xml,
            },
            patterns: PatternsConfig::default(),
        }
    }
}

/// Parent of the directory holding the running executable
///
/// A deployment looks like `<root>/bin/holehe-maltego` next to `<root>/venv`.
pub fn deployment_root() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| HoleheError::Io {
        source: e,
        context: "Failed to locate the running executable".to_string(),
    })?;

    exe.parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            HoleheError::Config(format!("Cannot derive deployment root from {:?}", exe))
        })
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}
