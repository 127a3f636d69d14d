//! Global header/footer record.
//!
//! The record is the single source of truth for the chosen header and footer.
//! The flat `globalHeaderVariant` / `globalFooterVariant` fields only exist on the
//! wire and are derived on serialization, so they cannot diverge from the slots.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ComponentData;

/// Which global slot an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalSlotKind {
    Header,
    Footer,
}

impl GlobalSlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GlobalSlotKind::Header => "header",
            GlobalSlotKind::Footer => "footer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "header" => Some(GlobalSlotKind::Header),
            "footer" => Some(GlobalSlotKind::Footer),
            _ => None,
        }
    }
}

/// A chosen variant and its data. `data.variant` always equals `variant`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalSlot {
    variant: String,
    data: ComponentData,
}

impl GlobalSlot {
    pub fn new(variant: impl Into<String>, mut data: ComponentData) -> Self {
        let variant = variant.into();
        data.insert("variant".to_string(), Value::String(variant.clone()));
        Self { variant, data }
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn data(&self) -> &ComponentData {
        &self.data
    }

    pub fn into_data(self) -> ComponentData {
        self.data
    }
}

/// The aggregate `globalComponentsData` record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGlobalComponents", into = "RawGlobalComponents")]
pub struct GlobalComponentsRecord {
    header: Option<GlobalSlot>,
    footer: Option<GlobalSlot>,
}

impl GlobalComponentsRecord {
    pub fn slot(&self, kind: GlobalSlotKind) -> Option<&GlobalSlot> {
        match kind {
            GlobalSlotKind::Header => self.header.as_ref(),
            GlobalSlotKind::Footer => self.footer.as_ref(),
        }
    }

    pub fn set_slot(&mut self, kind: GlobalSlotKind, slot: Option<GlobalSlot>) {
        match kind {
            GlobalSlotKind::Header => self.header = slot,
            GlobalSlotKind::Footer => self.footer = slot,
        }
    }

    pub fn header(&self) -> Option<&GlobalSlot> {
        self.header.as_ref()
    }

    pub fn footer(&self) -> Option<&GlobalSlot> {
        self.footer.as_ref()
    }

    /// Derived projection of the header slot's variant.
    pub fn global_header_variant(&self) -> Option<&str> {
        self.header.as_ref().map(GlobalSlot::variant)
    }

    /// Derived projection of the footer slot's variant.
    pub fn global_footer_variant(&self) -> Option<&str> {
        self.footer.as_ref().map(GlobalSlot::variant)
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.footer.is_none()
    }
}

/// One slot as it appears in theme files and backups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGlobalSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ComponentData>,
}

impl RawGlobalSlot {
    /// Variant recorded inside the data payload, if any.
    pub fn data_variant(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.get("variant"))
            .and_then(Value::as_str)
            .filter(|variant| !variant.is_empty())
    }

    pub fn own_variant(&self) -> Option<&str> {
        self.variant.as_deref().filter(|variant| !variant.is_empty())
    }
}

/// Wire form of `globalComponentsData` including the redundant flat fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGlobalComponents {
    #[serde(default)]
    pub header: Option<RawGlobalSlot>,
    #[serde(default)]
    pub footer: Option<RawGlobalSlot>,
    #[serde(default)]
    pub global_header_variant: Option<String>,
    #[serde(default)]
    pub global_footer_variant: Option<String>,
}

impl RawGlobalComponents {
    pub fn slot(&self, kind: GlobalSlotKind) -> Option<&RawGlobalSlot> {
        match kind {
            GlobalSlotKind::Header => self.header.as_ref(),
            GlobalSlotKind::Footer => self.footer.as_ref(),
        }
    }

    pub fn declared_variant(&self, kind: GlobalSlotKind) -> Option<&str> {
        let declared = match kind {
            GlobalSlotKind::Header => self.global_header_variant.as_deref(),
            GlobalSlotKind::Footer => self.global_footer_variant.as_deref(),
        };
        declared.filter(|variant| !variant.is_empty())
    }

    /// First non-empty variant for a slot: nested `data.variant`, the slot's own
    /// `variant`, then the flat top-level field.
    pub fn resolved_variant(&self, kind: GlobalSlotKind) -> Option<&str> {
        let raw = self.slot(kind);
        raw.and_then(RawGlobalSlot::data_variant)
            .or_else(|| raw.and_then(RawGlobalSlot::own_variant))
            .or_else(|| self.declared_variant(kind))
    }

    /// Resolve a fully-specified slot without consulting defaults.
    /// A slot with no resolvable variant is dropped.
    fn resolve_slot(&self, kind: GlobalSlotKind) -> Option<GlobalSlot> {
        let raw = self.slot(kind);
        let variant = self.resolved_variant(kind)?;
        let data = raw.and_then(|slot| slot.data.clone()).unwrap_or_default();
        Some(GlobalSlot::new(variant, data))
    }
}

impl From<RawGlobalComponents> for GlobalComponentsRecord {
    fn from(raw: RawGlobalComponents) -> Self {
        let header = raw.resolve_slot(GlobalSlotKind::Header);
        let footer = raw.resolve_slot(GlobalSlotKind::Footer);
        if header.is_none() && raw.header.is_some() {
            tracing::warn!("Dropping global header without a resolvable variant");
        }
        if footer.is_none() && raw.footer.is_some() {
            tracing::warn!("Dropping global footer without a resolvable variant");
        }
        Self { header, footer }
    }
}

impl From<GlobalComponentsRecord> for RawGlobalComponents {
    fn from(record: GlobalComponentsRecord) -> Self {
        let global_header_variant = record.global_header_variant().map(str::to_string);
        let global_footer_variant = record.global_footer_variant().map(str::to_string);
        let to_raw = |slot: GlobalSlot| RawGlobalSlot {
            variant: Some(slot.variant.clone()),
            data: Some(slot.into_data()),
        };
        Self {
            header: record.header.map(to_raw),
            footer: record.footer.map(to_raw),
            global_header_variant,
            global_footer_variant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slot_forces_nested_variant() {
        let data = json!({ "logo": "a.png", "variant": "Other" });
        let slot = GlobalSlot::new("StaticHeader2", data.as_object().unwrap().clone());
        assert_eq!(slot.variant(), "StaticHeader2");
        assert_eq!(slot.data()["variant"], "StaticHeader2");
        assert_eq!(slot.data()["logo"], "a.png");
    }

    #[test]
    fn serializes_derived_flat_variants() {
        let mut record = GlobalComponentsRecord::default();
        record.set_slot(
            GlobalSlotKind::Header,
            Some(GlobalSlot::new("StaticHeader1", ComponentData::new())),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["globalHeaderVariant"], "StaticHeader1");
        assert_eq!(value["header"]["variant"], "StaticHeader1");
        assert_eq!(value["header"]["data"]["variant"], "StaticHeader1");
        assert!(value["footer"].is_null());
        assert!(value["globalFooterVariant"].is_null());
    }

    #[test]
    fn deserialize_prefers_nested_variant() {
        let record: GlobalComponentsRecord = serde_json::from_value(json!({
            "header": { "variant": "StaticHeader1", "data": { "variant": "StaticHeader2" } },
            "footer": { "data": { "text": "hi" } },
            "globalFooterVariant": "StaticFooter3"
        }))
        .unwrap();
        assert_eq!(record.global_header_variant(), Some("StaticHeader2"));
        assert_eq!(record.global_footer_variant(), Some("StaticFooter3"));
        assert_eq!(record.footer().unwrap().data()["variant"], "StaticFooter3");
    }

    #[test]
    fn empty_variants_fall_through() {
        let record: GlobalComponentsRecord = serde_json::from_value(json!({
            "header": { "variant": "StaticHeader2", "data": { "variant": "" } },
            "footer": { "variant": "", "data": { "variant": "" } },
            "globalFooterVariant": "StaticFooter2"
        }))
        .unwrap();
        assert_eq!(record.global_header_variant(), Some("StaticHeader2"));
        assert_eq!(record.header().unwrap().data()["variant"], "StaticHeader2");
        assert_eq!(record.global_footer_variant(), Some("StaticFooter2"));
    }

    #[test]
    fn slot_without_variant_is_dropped() {
        let record: GlobalComponentsRecord = serde_json::from_value(json!({
            "header": { "data": { "logo": "x" } }
        }))
        .unwrap();
        assert!(record.is_empty());
    }
}
