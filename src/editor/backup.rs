//! Theme backup snapshots.
//!
//! A backup is a JSON object stored in the website layout record: every page's
//! component collection keyed by slug, plus two reserved entries for the global
//! components and the static pages.

use serde_json::{Map, Value};

use super::store::EditorStore;
use crate::errors::AppError;
use crate::models::GlobalComponentsRecord;

pub const GLOBAL_COMPONENTS_KEY: &str = "_globalComponentsData";
pub const STATIC_PAGES_KEY: &str = "_staticPagesData";

/// A backup blob split into its parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Backup {
    pub pages: Map<String, Value>,
    pub global_components: Option<GlobalComponentsRecord>,
    pub static_pages: Map<String, Value>,
}

impl Backup {
    /// Split a stored blob. Absent, non-object and empty blobs yield `None`.
    pub fn from_blob(blob: Option<&Value>) -> Option<Self> {
        let fields = blob?.as_object().filter(|fields| !fields.is_empty())?;

        let mut backup = Backup::default();
        for (key, value) in fields {
            match key.as_str() {
                GLOBAL_COMPONENTS_KEY => {
                    backup.global_components = match value {
                        Value::Null => None,
                        value => match serde_json::from_value(value.clone()) {
                            Ok(record) => Some(record),
                            Err(e) => {
                                tracing::warn!("Ignoring unreadable global components snapshot: {}", e);
                                None
                            }
                        },
                    };
                }
                STATIC_PAGES_KEY => {
                    if let Some(pages) = value.as_object() {
                        backup.static_pages = pages.clone();
                    }
                }
                _ => {
                    backup.pages.insert(key.clone(), value.clone());
                }
            }
        }
        Some(backup)
    }
}

/// Snapshot the store's pages, static pages and global components into a blob.
pub fn capture_backup<S: EditorStore + ?Sized>(store: &S) -> Result<Value, AppError> {
    let to_value = |value: serde_json::Result<Value>| {
        value.map_err(|e| AppError::Internal(format!("Failed to capture backup: {}", e)))
    };

    let mut blob = Map::new();
    for slug in store.page_slugs() {
        let components = store.page_components(&slug).unwrap_or_default();
        blob.insert(slug, to_value(serde_json::to_value(components))?);
    }

    blob.insert(
        GLOBAL_COMPONENTS_KEY.to_string(),
        to_value(serde_json::to_value(store.global_components()))?,
    );

    let mut static_pages = Map::new();
    for slug in store.static_page_slugs() {
        if let Some(doc) = store.static_page_data(&slug) {
            static_pages.insert(slug, to_value(serde_json::to_value(doc))?);
        }
    }
    blob.insert(STATIC_PAGES_KEY.to_string(), Value::Object(static_pages));

    Ok(Value::Object(blob))
}
