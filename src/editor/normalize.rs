//! Component descriptor normalizer.
//!
//! Turns a raw, possibly inconsistent component record into a canonical
//! [`ComponentDescriptor`]. Normalization never fails: malformed input yields a
//! best-effort descriptor and a list of warnings describing what was patched up.

use serde_json::Value;

use crate::models::{ComponentData, ComponentDescriptor, ComponentLayout};

/// Result of normalizing one raw record.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub descriptor: ComponentDescriptor,
    pub warnings: Vec<String>,
}

/// Identifier synthesized for records without one.
pub fn fallback_id(index: usize) -> String {
    format!("comp-{}", index)
}

/// Normalize `raw`, found at `index` in its page.
///
/// Static page descriptors always take `componentName` as their id; whatever id
/// the source carried is discarded.
pub fn normalize(raw: &Value, index: usize, is_static: bool) -> Normalized {
    let mut warnings = Vec::new();
    let empty = serde_json::Map::new();
    let fields = match raw.as_object() {
        Some(fields) => fields,
        None => {
            warnings.push(format!("component {} is not an object", index));
            &empty
        }
    };

    let component_type = string_field(fields.get("type")).unwrap_or_else(|| {
        warnings.push(format!("component {} has no type", index));
        String::new()
    });
    let component_name = string_field(fields.get("componentName")).unwrap_or_else(|| {
        warnings.push(format!("component {} has no componentName", index));
        String::new()
    });

    let id = if is_static {
        if component_name.is_empty() {
            fallback_id(index)
        } else {
            component_name.clone()
        }
    } else {
        string_field(fields.get("id")).unwrap_or_else(|| fallback_id(index))
    };

    let data = match fields.get("data") {
        None | Some(Value::Null) => ComponentData::new(),
        Some(Value::Object(data)) => data.clone(),
        Some(_) => {
            warnings.push(format!("component {} has non-object data", index));
            ComponentData::new()
        }
    };

    let position = match fields.get("position") {
        None | Some(Value::Null) => index as i64,
        Some(value) => match value.as_i64().or_else(|| value.as_f64().map(|f| f as i64)) {
            Some(0) => index as i64,
            Some(position) => position,
            None => {
                warnings.push(format!("component {} has a non-numeric position", index));
                index as i64
            }
        },
    };

    let layout = match fields.get("layout") {
        Some(Value::Object(layout)) => Some(parse_layout(layout)),
        Some(Value::Null) | None => None,
        Some(_) => {
            warnings.push(format!("component {} has a malformed layout", index));
            None
        }
    };
    let layout = if is_static {
        Some(layout.unwrap_or_default())
    } else {
        layout
    };

    Normalized {
        descriptor: ComponentDescriptor {
            id,
            component_type,
            component_name,
            data,
            position,
            layout,
            force_update: None,
        },
        warnings,
    }
}

/// Accept strings and numbers as identifiers; empty strings count as missing.
fn string_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_layout(layout: &serde_json::Map<String, Value>) -> ComponentLayout {
    let defaults = ComponentLayout::default();
    let field = |name: &str, default: i64| {
        layout
            .get(name)
            .and_then(Value::as_i64)
            .unwrap_or(default)
    };
    ComponentLayout {
        row: field("row", defaults.row),
        col: field("col", defaults.col),
        span: field("span", defaults.span),
    }
}
