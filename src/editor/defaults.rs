//! Shipped default data per component family and variant.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::models::ComponentData;

type DefaultsRegistry = BTreeMap<String, BTreeMap<String, ComponentData>>;

static DEFAULTS: Lazy<DefaultsRegistry> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../themes/component_defaults.json")).unwrap_or_else(
        |e| {
            tracing::error!("Component defaults failed to parse: {}", e);
            DefaultsRegistry::new()
        },
    )
});

/// Default data for a variant, or an empty mapping for unknown variants.
pub fn defaults_for(component_type: &str, variant: &str) -> ComponentData {
    match DEFAULTS.get(component_type).and_then(|v| v.get(variant)) {
        Some(data) => data.clone(),
        None => {
            tracing::debug!("No defaults for {}/{}", component_type, variant);
            ComponentData::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_variant_has_defaults() {
        let header = defaults_for("header", "StaticHeader1");
        assert_eq!(header["sticky"], true);
        assert!(header["menu"].is_array());
    }

    #[test]
    fn unknown_variant_is_empty() {
        assert!(defaults_for("header", "Nope").is_empty());
        assert!(defaults_for("nope", "StaticHeader1").is_empty());
    }
}
