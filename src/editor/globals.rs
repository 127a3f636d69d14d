//! Global header/footer applier.
//!
//! Two merge orders exist. Applying a theme layers the variant's defaults under
//! the theme's data. Changing a variant mid-session additionally keeps the
//! slot's current (user-customized) data between the defaults and the theme
//! overrides. In both cases the explicit variant is written last.

use serde_json::Value;

use super::defaults::defaults_for;
use super::store::EditorStore;
use crate::models::{ComponentData, GlobalSlotKind, RawGlobalComponents};

pub const DEFAULT_HEADER_VARIANT: &str = "StaticHeader1";
pub const DEFAULT_FOOTER_VARIANT: &str = "StaticFooter1";

pub fn default_variant(kind: GlobalSlotKind) -> &'static str {
    match kind {
        GlobalSlotKind::Header => DEFAULT_HEADER_VARIANT,
        GlobalSlotKind::Footer => DEFAULT_FOOTER_VARIANT,
    }
}

fn overlay(target: &mut ComponentData, layer: &ComponentData) {
    for (key, value) in layer {
        target.insert(key.clone(), value.clone());
    }
}

/// `defaults < incoming < variant`.
pub fn merge_theme_data(
    defaults: &ComponentData,
    incoming: &ComponentData,
    variant: &str,
) -> ComponentData {
    let mut merged = defaults.clone();
    overlay(&mut merged, incoming);
    merged.insert("variant".to_string(), Value::String(variant.to_string()));
    merged
}

/// `defaults < backup < overrides < variant`.
pub fn merge_with_backup(
    defaults: &ComponentData,
    backup: &ComponentData,
    overrides: &ComponentData,
    variant: &str,
) -> ComponentData {
    let mut merged = defaults.clone();
    overlay(&mut merged, backup);
    overlay(&mut merged, overrides);
    merged.insert("variant".to_string(), Value::String(variant.to_string()));
    merged
}

/// Write a resolved slot: variant first, then data, then the per-variant slot.
fn write_global<S: EditorStore + ?Sized>(
    store: &mut S,
    kind: GlobalSlotKind,
    variant: &str,
    data: ComponentData,
) {
    store.set_global_variant(kind, variant);
    store.set_global_data(kind, data.clone());
    store.ensure_component_variant(kind.as_str(), variant, &data);
    store.set_component_data(kind.as_str(), variant, data);
}

/// Apply theme data for one slot on top of the variant's defaults.
pub fn apply_global<S: EditorStore + ?Sized>(
    store: &mut S,
    kind: GlobalSlotKind,
    data: &ComponentData,
    variant: &str,
) -> ComponentData {
    let merged = merge_theme_data(&defaults_for(kind.as_str(), variant), data, variant);
    write_global(store, kind, variant, merged.clone());
    tracing::debug!("Applied {} variant {}", kind.as_str(), variant);
    merged
}

pub fn apply_header<S: EditorStore + ?Sized>(
    store: &mut S,
    data: &ComponentData,
    variant: &str,
) -> ComponentData {
    apply_global(store, GlobalSlotKind::Header, data, variant)
}

pub fn apply_footer<S: EditorStore + ?Sized>(
    store: &mut S,
    data: &ComponentData,
    variant: &str,
) -> ComponentData {
    apply_global(store, GlobalSlotKind::Footer, data, variant)
}

/// Pick the variant for a slot: nested `data.variant`, the slot's `variant`,
/// the theme-level declared variant, then the hardcoded default.
pub fn resolve_variant(raw: Option<&RawGlobalComponents>, kind: GlobalSlotKind) -> String {
    raw.and_then(|r| r.resolved_variant(kind))
        .unwrap_or_else(|| default_variant(kind))
        .to_string()
}

/// Apply a theme's header and footer.
pub fn apply_globals<S: EditorStore + ?Sized>(store: &mut S, raw: Option<&RawGlobalComponents>) {
    if raw.is_none() {
        tracing::debug!("Theme has no global components; applying default variants");
    }
    for kind in [GlobalSlotKind::Header, GlobalSlotKind::Footer] {
        let variant = resolve_variant(raw, kind);
        let data = raw
            .and_then(|r| r.slot(kind))
            .and_then(|slot| slot.data.clone())
            .unwrap_or_default();
        match kind {
            GlobalSlotKind::Header => apply_header(store, &data, &variant),
            GlobalSlotKind::Footer => apply_footer(store, &data, &variant),
        };
    }
}

/// Switch a slot to `variant` mid-session, keeping the slot's current data.
pub fn change_global_variant<S: EditorStore + ?Sized>(
    store: &mut S,
    kind: GlobalSlotKind,
    variant: &str,
    overrides: &ComponentData,
) -> ComponentData {
    let current = store
        .global_components()
        .slot(kind)
        .map(|slot| slot.data().clone())
        .unwrap_or_default();
    let merged = merge_with_backup(
        &defaults_for(kind.as_str(), variant),
        &current,
        overrides,
        variant,
    );
    write_global(store, kind, variant, merged.clone());
    tracing::info!("Changed {} variant to {}", kind.as_str(), variant);
    merged
}
