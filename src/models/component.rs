//! Component descriptor model.

use serde::{Deserialize, Serialize};

/// Per-instance configuration of a placed component. Keys are variant specific.
pub type ComponentData = serde_json::Map<String, serde_json::Value>;

/// Grid geometry used by static pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentLayout {
    pub row: i64,
    pub col: i64,
    pub span: i64,
}

impl Default for ComponentLayout {
    fn default() -> Self {
        Self {
            row: 0,
            col: 0,
            span: 2,
        }
    }
}

/// One placed component instance on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub component_name: String,
    #[serde(default)]
    pub data: ComponentData,
    pub position: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<ComponentLayout>,
    /// Re-render tag stamped on static page descriptors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_update: Option<i64>,
}

impl ComponentDescriptor {
    /// Copy of the descriptor without its re-render tag, for structural comparison.
    #[cfg(test)]
    pub fn without_force_update(&self) -> Self {
        Self {
            force_update: None,
            ..self.clone()
        }
    }
}
