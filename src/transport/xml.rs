// Maltego response message serialization
use crate::entities::{OutputEntity, TransformResponse};
use crate::error::{HoleheError, Result};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Matching rule attached to every additional field
const MATCHING_RULE: &str = "strict";

/// Serialize a response as a `MaltegoMessage` document (no XML declaration)
pub fn to_xml(response: &TransformResponse) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    start(&mut writer, BytesStart::new("MaltegoMessage"))?;
    start(&mut writer, BytesStart::new("MaltegoTransformResponseMessage"))?;
    start(&mut writer, BytesStart::new("Entities"))?;

    for entity in &response.entities {
        write_entity(&mut writer, entity)?;
    }

    end(&mut writer, "Entities")?;
    end(&mut writer, "MaltegoTransformResponseMessage")?;
    end(&mut writer, "MaltegoMessage")?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| HoleheError::Xml(format!("Response is not valid UTF-8: {}", e)))
}

fn write_entity(writer: &mut Writer<Vec<u8>>, entity: &OutputEntity) -> Result<()> {
    let mut element = BytesStart::new("Entity");
    element.push_attribute(("Type", entity.kind.type_name()));
    start(writer, element)?;

    text_element(writer, BytesStart::new("Value"), "Value", &entity.value)?;

    if !entity.fields.is_empty() {
        start(writer, BytesStart::new("AdditionalFields"))?;
        for field in &entity.fields {
            let mut element = BytesStart::new("Field");
            element.push_attribute(("Name", field.name.as_str()));
            element.push_attribute(("DisplayName", field.name.as_str()));
            element.push_attribute(("MatchingRule", MATCHING_RULE));
            text_element(writer, element, "Field", &field.value)?;
        }
        end(writer, "AdditionalFields")?;
    }

    end(writer, "Entity")
}

fn text_element(
    writer: &mut Writer<Vec<u8>>,
    element: BytesStart<'_>,
    name: &str,
    text: &str,
) -> Result<()> {
    start(writer, element)?;
    write(writer, Event::Text(BytesText::new(text)))?;
    end(writer, name)
}

fn start(writer: &mut Writer<Vec<u8>>, element: BytesStart<'_>) -> Result<()> {
    write(writer, Event::Start(element))
}

fn end(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| HoleheError::Xml(e.to_string()))
}
