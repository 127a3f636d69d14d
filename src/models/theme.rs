//! Shipped theme definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::RawGlobalComponents;

/// An immutable, code-shipped page template bundle.
///
/// Older theme files key their pages under `componentSettings`, newer ones
/// under `pages`; both deserialize into `pages`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDefinition {
    #[serde(default, alias = "componentSettings")]
    pub pages: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_components_data: Option<RawGlobalComponents>,
    #[serde(default)]
    pub static_pages: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_both_legacy_page_keys() {
        let legacy: ThemeDefinition = serde_json::from_value(json!({
            "componentSettings": { "homepage": [] }
        }))
        .unwrap();
        let current: ThemeDefinition = serde_json::from_value(json!({
            "pages": { "homepage": [] }
        }))
        .unwrap();
        assert!(legacy.pages.contains_key("homepage"));
        assert_eq!(legacy.pages, current.pages);
        assert!(legacy.static_pages.is_empty());
        assert!(legacy.global_components_data.is_none());
    }
}
