//! Page documents and the raw shapes they are read from.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ComponentDescriptor;

/// A named page owning an ordered component collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
    pub slug: String,
    #[serde(default)]
    pub components: Vec<ComponentDescriptor>,
}

impl PageDocument {
    pub fn new(slug: impl Into<String>, components: Vec<ComponentDescriptor>) -> Self {
        Self {
            slug: slug.into(),
            components,
        }
    }
}

/// Stored component collection, tagged by the shape it arrived in.
///
/// Pages are persisted either as an ordered array of descriptors or as a map of
/// id to descriptor fragment. The adapter below is the only place that sniffs
/// the shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPageComponents {
    List(Vec<Value>),
    Map(Vec<(String, Value)>),
    Empty,
}

impl RawPageComponents {
    /// Classify a raw value read from a collaborator.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => RawPageComponents::List(items.clone()),
            Value::Object(entries) => RawPageComponents::Map(
                entries
                    .iter()
                    .map(|(key, fragment)| (key.clone(), fragment.clone()))
                    .collect(),
            ),
            _ => RawPageComponents::Empty,
        }
    }

    /// Classify a page value that may be wrapped in a `PageDocument` envelope.
    ///
    /// Static page snapshots store `{slug, components: [...]}` while theme files
    /// store the component collection directly.
    pub fn from_page_value(value: &Value) -> Self {
        match value.get("components") {
            Some(inner @ (Value::Array(_) | Value::Object(_))) => Self::from_value(inner),
            _ => Self::from_value(value),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RawPageComponents::List(items) => items.len(),
            RawPageComponents::Map(entries) => entries.len(),
            RawPageComponents::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
