//! Page component assembler.
//!
//! Converts a page's stored component collection into an ordered descriptor
//! sequence and registers each descriptor's data in the editor store.

use std::collections::HashSet;

use serde_json::Value;

use super::normalize::normalize;
use super::store::EditorStore;
use crate::models::{ComponentDescriptor, RawPageComponents};

/// Ordered descriptors plus the warnings raised while building them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembled {
    pub components: Vec<ComponentDescriptor>,
    pub warnings: Vec<String>,
}

/// Normalize a raw collection into an ordered, id-unique descriptor sequence.
///
/// Map entries use their key as the id unless the fragment carries its own.
pub fn assemble_components(raw: &RawPageComponents) -> Assembled {
    let mut assembled = Assembled::default();
    if raw.is_empty() {
        return assembled;
    }
    let normalized = match raw {
        RawPageComponents::List(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| normalize(item, index, false))
            .collect::<Vec<_>>(),
        RawPageComponents::Map(entries) => entries
            .iter()
            .enumerate()
            .map(|(index, (key, fragment))| normalize(&with_key_id(key, fragment), index, false))
            .collect(),
        RawPageComponents::Empty => Vec::new(),
    };

    let mut seen = HashSet::new();
    for (index, result) in normalized.into_iter().enumerate() {
        let mut descriptor = result.descriptor;
        assembled.warnings.extend(result.warnings);
        if !seen.insert(descriptor.id.clone()) {
            let unique = unique_id(&descriptor.id, index, &seen);
            assembled.warnings.push(format!(
                "duplicate component id {} renamed to {}",
                descriptor.id, unique
            ));
            descriptor.id = unique.clone();
            seen.insert(unique);
        }
        assembled.components.push(descriptor);
    }

    assembled.components.sort_by_key(|d| d.position);
    assembled
}

fn with_key_id(key: &str, fragment: &Value) -> Value {
    match fragment {
        Value::Object(fields) if !has_id(fields) => {
            let mut fields = fields.clone();
            fields.insert("id".to_string(), Value::String(key.to_string()));
            Value::Object(fields)
        }
        _ => fragment.clone(),
    }
}

fn has_id(fields: &serde_json::Map<String, Value>) -> bool {
    match fields.get("id") {
        Some(Value::String(id)) => !id.is_empty(),
        Some(Value::Number(_)) => true,
        _ => false,
    }
}

fn unique_id(id: &str, index: usize, seen: &HashSet<String>) -> String {
    let mut candidate = format!("{}-{}", id, index);
    let mut attempt = 1;
    while seen.contains(&candidate) {
        candidate = format!("{}-{}-{}", id, index, attempt);
        attempt += 1;
    }
    candidate
}

/// Push each descriptor's data into its per-variant slot, keyed by `key_of`.
pub(crate) fn register_components<S, F>(store: &mut S, components: &[ComponentDescriptor], key_of: F)
where
    S: EditorStore + ?Sized,
    F: Fn(&ComponentDescriptor) -> &str,
{
    for descriptor in components {
        if descriptor.component_type.is_empty() {
            continue;
        }
        let key = key_of(descriptor);
        store.ensure_component_variant(&descriptor.component_type, key, &descriptor.data);
        store.set_component_data(&descriptor.component_type, key, descriptor.data.clone());
    }
}

/// Assemble a raw collection and register every descriptor in the store.
pub fn assemble<S: EditorStore + ?Sized>(store: &mut S, raw: &Value) -> Assembled {
    let assembled = assemble_components(&RawPageComponents::from_value(raw));
    register_components(store, &assembled.components, |d| d.id.as_str());
    assembled
}

/// Assemble a page, store it, and force a re-render if it is the active page.
pub fn apply_page<S: EditorStore + ?Sized>(store: &mut S, slug: &str, raw: &Value) -> Assembled {
    let assembled = assemble(store, raw);
    for warning in &assembled.warnings {
        tracing::warn!("Page {}: {}", slug, warning);
    }

    store.set_page_components_for_page(slug, assembled.components.clone());
    if store.current_page() == Some(slug) {
        tracing::debug!("Forcing re-render of active page {}", slug);
        store.force_update_page_components(slug, assembled.components.clone());
    }
    assembled
}
