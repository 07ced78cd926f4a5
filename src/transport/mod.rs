//! Response document serialization
//!
//! XML is what Maltego consumes. JSON carries the same entities for scripting
//! and debugging.

mod xml;

pub use xml::to_xml;

use crate::entities::TransformResponse;
use crate::error::{HoleheError, Result};
use serde::{Deserialize, Serialize};

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Maltego transform response message
    #[default]
    Xml,
    /// `{"entities": [...]}`
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = HoleheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(OutputFormat::Xml),
            "json" => Ok(OutputFormat::Json),
            other => Err(HoleheError::Config(format!(
                "Unknown output format '{}' (expected xml or json)",
                other
            ))),
        }
    }
}

/// Serialize a response in the requested format
pub fn render(response: &TransformResponse, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Xml => to_xml(response),
        OutputFormat::Json => to_json(response),
    }
}

pub fn to_json(response: &TransformResponse) -> Result<String> {
    serde_json::to_string(response).map_err(|e| HoleheError::Json {
        source: e,
        context: "Failed to serialize transform response".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::OutputEntity;

    #[test]
    fn test_format_from_str() {
        assert_eq!("XML".parse::<OutputFormat>().unwrap(), OutputFormat::Xml);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_json() {
        let response = TransformResponse::new(vec![OutputEntity::phrase("x")]);
        let json = render(&response, OutputFormat::Json).unwrap();
        assert_eq!(
            json,
            r#"{"entities":[{"type":"maltego.Phrase","value":"x"}]}"#
        );
    }
}
