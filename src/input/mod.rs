//! Identifier resolution
//!
//! The email comes either from a TRX request message (XML on stdin) or from a
//! positional argument. A missing identifier resolves to an empty string; the
//! transform reports it rather than failing.

use crate::error::{HoleheError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Extract the value of the first entity in a `MaltegoTransformRequestMessage`
///
/// Returns `Ok(None)` when the message carries no entity value.
pub fn parse_request(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_entity = false;
    let mut in_value = false;
    let mut value = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"Entity" => in_entity = true,
                b"Value" if in_entity => in_value = true,
                _ => {}
            },
            Ok(Event::Text(e)) if in_value => {
                let text = e
                    .unescape()
                    .map_err(|e| HoleheError::Request(e.to_string()))?;
                value.push_str(&text);
            }
            Ok(Event::CData(e)) if in_value => {
                value.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"Value" if in_value => {
                    let trimmed = value.trim();
                    return Ok((!trimmed.is_empty()).then(|| trimmed.to_string()));
                }
                b"Entity" => in_entity = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(HoleheError::Request(e.to_string())),
            _ => {}
        }
    }

    Ok(None)
}

/// Resolve the identifier from an optional request message and an optional argument
///
/// The request wins when it carries a non-blank value. Malformed requests are
/// logged and treated as absent.
pub fn resolve_identifier(request: Option<&str>, argument: Option<&str>) -> String {
    let from_request = request
        .filter(|xml| !xml.trim().is_empty())
        .and_then(|xml| match parse_request(xml) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Ignoring unreadable transform request: {}", e);
                None
            }
        });

    from_request
        .or_else(|| argument.map(str::to_string))
        .map(|id| id.trim().to_string())
        .unwrap_or_default()
}
