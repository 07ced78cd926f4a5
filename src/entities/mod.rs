//! Maltego output entities
//!
//! This module provides:
//! - The typed entity record written to the response document
//! - The emitter that turns a classification into an ordered entity list
//! - Diagnostic entities for runs that stop early

mod emitter;

pub use emitter::{Diagnostic, EntityEmitter};

use serde::{Deserialize, Serialize};

/// Maltego entity type of an emitted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(rename = "maltego.Website")]
    Website,
    #[serde(rename = "maltego.Phrase")]
    Phrase,
    #[serde(rename = "maltego.URL")]
    Url,
}

impl EntityKind {
    /// Value of the `Type` attribute in the response XML
    pub fn type_name(self) -> &'static str {
        match self {
            EntityKind::Website => "maltego.Website",
            EntityKind::Phrase => "maltego.Phrase",
            EntityKind::Url => "maltego.URL",
        }
    }
}

/// Named attribute attached to an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityField {
    pub name: String,
    pub value: String,
}

/// One entity of the response document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEntity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EntityField>,
}

impl OutputEntity {
    pub fn new(kind: EntityKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            fields: Vec::new(),
        }
    }

    pub fn phrase(value: impl Into<String>) -> Self {
        Self::new(EntityKind::Phrase, value)
    }

    /// Append a field, keeping insertion order
    pub fn with_field(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push(EntityField {
            name: name.into(),
            value: value.to_string(),
        });
        self
    }

    /// Look up a field value by name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// Complete transform response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformResponse {
    pub entities: Vec<OutputEntity>,
}

impl TransformResponse {
    pub fn new(entities: Vec<OutputEntity>) -> Self {
        Self { entities }
    }

    /// Response holding a single diagnostic entity
    pub fn diagnostic(diagnostic: Diagnostic) -> Self {
        Self::new(vec![diagnostic.into_entity()])
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
