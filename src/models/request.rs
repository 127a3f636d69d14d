//! Request bodies accepted by the editor API.

use serde::Deserialize;

use super::ComponentData;

/// Request to change the page the editor is showing.
#[derive(Debug, Clone, Deserialize)]
pub struct SetCurrentPageRequest {
    pub slug: String,
}

/// Request to switch a global slot to another variant.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeGlobalVariantRequest {
    pub variant: String,
    /// Data layered over the slot's current data before the variant is forced.
    #[serde(default)]
    pub overrides: ComponentData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn overrides_default_to_empty() {
        let request: ChangeGlobalVariantRequest =
            serde_json::from_value(json!({ "variant": "StaticHeader2" })).unwrap();
        assert_eq!(request.variant, "StaticHeader2");
        assert!(request.overrides.is_empty());
    }
}
