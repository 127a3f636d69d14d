//! Editor store contract and its in-memory implementation.
//!
//! Every engine function takes the store as an explicit `&mut impl EditorStore`
//! so it can be exercised against a plain `EditorState` (or a recording wrapper)
//! without bootstrapping a session.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::models::{
    ComponentData, ComponentDescriptor, GlobalComponentsRecord, GlobalSlot, GlobalSlotKind,
    PageDocument, TenantDocument, WebsiteLayout,
};

/// Read/write capability over one tenant's editor document.
pub trait EditorStore {
    fn current_page(&self) -> Option<&str>;
    fn current_theme(&self) -> Option<i64>;
    fn page_components(&self, slug: &str) -> Option<&[ComponentDescriptor]>;
    fn page_slugs(&self) -> Vec<String>;
    fn static_page_data(&self, slug: &str) -> Option<&PageDocument>;
    fn static_page_slugs(&self) -> Vec<String>;
    fn global_components(&self) -> &GlobalComponentsRecord;
    fn component_data(&self, component_type: &str, key: &str) -> Option<&ComponentData>;
    fn layout(&self) -> &WebsiteLayout;

    fn set_current_page(&mut self, slug: &str);
    fn set_page_components_for_page(&mut self, slug: &str, components: Vec<ComponentDescriptor>);
    /// Replace a page's components and mark it for an unconditional re-render.
    fn force_update_page_components(&mut self, slug: &str, components: Vec<ComponentDescriptor>);
    fn set_static_page_data(&mut self, slug: &str, doc: PageDocument);
    fn set_global_variant(&mut self, slot: GlobalSlotKind, variant: &str);
    fn set_global_data(&mut self, slot: GlobalSlotKind, data: ComponentData);
    fn set_global_components_data(&mut self, record: GlobalComponentsRecord);
    /// Create the per-variant slot with `data` if it does not exist yet.
    fn ensure_component_variant(&mut self, component_type: &str, key: &str, data: &ComponentData);
    fn set_component_data(&mut self, component_type: &str, key: &str, data: ComponentData);
    fn set_current_theme(&mut self, theme: i64);
    /// Store a named blob in the layout record, or remove it with `None`.
    fn set_theme_backup(&mut self, key: &str, blob: Option<Value>);
    fn clear_all_states(&mut self);
    fn set_website_layout(&mut self, layout: WebsiteLayout);
    /// Next re-render tag; strictly greater than every tag handed out before.
    fn next_force_stamp(&mut self) -> i64;
}

/// In-memory editor document for one tenant.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    page_components_by_page: BTreeMap<String, Vec<ComponentDescriptor>>,
    static_pages_data: BTreeMap<String, PageDocument>,
    global_components: GlobalComponentsRecord,
    component_states: BTreeMap<String, BTreeMap<String, ComponentData>>,
    force_update_markers: BTreeMap<String, i64>,
    current_page: Option<String>,
    current_theme: Option<i64>,
    theme_change_timestamp: Option<i64>,
    website_layout: WebsiteLayout,
    last_force_stamp: i64,
    revision: i64,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutation counter; bumped by every write.
    pub fn revision(&self) -> i64 {
        self.revision
    }

    pub fn force_update_marker(&self, slug: &str) -> Option<i64> {
        self.force_update_markers.get(slug).copied()
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Document handed to the tenant store after a restore or theme change.
    pub fn tenant_document(&self) -> TenantDocument {
        TenantDocument {
            component_settings: self.page_components_by_page.clone(),
            static_pages_data: self.static_pages_data.clone(),
            global_components_data: self.global_components.clone(),
            current_theme: self.current_theme,
        }
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            page_components_by_page: self.page_components_by_page.clone(),
            static_pages_data: self.static_pages_data.clone(),
            global_components_data: self.global_components.clone(),
            global_header_data: self.global_components.header().cloned(),
            global_footer_data: self.global_components.footer().cloned(),
            global_header_variant: self
                .global_components
                .global_header_variant()
                .map(str::to_string),
            global_footer_variant: self
                .global_components
                .global_footer_variant()
                .map(str::to_string),
            component_states: self.component_states.clone(),
            force_update_markers: self.force_update_markers.clone(),
            current_page: self.current_page.clone(),
            current_theme: self.current_theme,
            theme_change_timestamp: self.theme_change_timestamp,
            website_layout: self.website_layout.clone(),
            revision: self.revision,
        }
    }
}

/// Serializable view of an [`EditorState`], with the variant projections filled in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    pub page_components_by_page: BTreeMap<String, Vec<ComponentDescriptor>>,
    pub static_pages_data: BTreeMap<String, PageDocument>,
    pub global_components_data: GlobalComponentsRecord,
    pub global_header_data: Option<GlobalSlot>,
    pub global_footer_data: Option<GlobalSlot>,
    pub global_header_variant: Option<String>,
    pub global_footer_variant: Option<String>,
    pub component_states: BTreeMap<String, BTreeMap<String, ComponentData>>,
    pub force_update_markers: BTreeMap<String, i64>,
    pub current_page: Option<String>,
    pub current_theme: Option<i64>,
    pub theme_change_timestamp: Option<i64>,
    pub website_layout: WebsiteLayout,
    pub revision: i64,
}

impl EditorStore for EditorState {
    fn current_page(&self) -> Option<&str> {
        self.current_page.as_deref()
    }

    fn current_theme(&self) -> Option<i64> {
        self.current_theme
    }

    fn page_components(&self, slug: &str) -> Option<&[ComponentDescriptor]> {
        self.page_components_by_page.get(slug).map(Vec::as_slice)
    }

    fn page_slugs(&self) -> Vec<String> {
        self.page_components_by_page.keys().cloned().collect()
    }

    fn static_page_data(&self, slug: &str) -> Option<&PageDocument> {
        self.static_pages_data.get(slug)
    }

    fn static_page_slugs(&self) -> Vec<String> {
        self.static_pages_data.keys().cloned().collect()
    }

    fn global_components(&self) -> &GlobalComponentsRecord {
        &self.global_components
    }

    fn component_data(&self, component_type: &str, key: &str) -> Option<&ComponentData> {
        self.component_states.get(component_type)?.get(key)
    }

    fn layout(&self) -> &WebsiteLayout {
        &self.website_layout
    }

    fn set_current_page(&mut self, slug: &str) {
        self.current_page = Some(slug.to_string());
        self.touch();
    }

    fn set_page_components_for_page(&mut self, slug: &str, components: Vec<ComponentDescriptor>) {
        self.page_components_by_page
            .insert(slug.to_string(), components);
        self.touch();
    }

    fn force_update_page_components(&mut self, slug: &str, components: Vec<ComponentDescriptor>) {
        let stamp = self.next_force_stamp();
        self.page_components_by_page
            .insert(slug.to_string(), components);
        self.force_update_markers.insert(slug.to_string(), stamp);
        self.touch();
    }

    fn set_static_page_data(&mut self, slug: &str, doc: PageDocument) {
        self.static_pages_data.insert(slug.to_string(), doc);
        self.touch();
    }

    fn set_global_variant(&mut self, slot: GlobalSlotKind, variant: &str) {
        let data = self
            .global_components
            .slot(slot)
            .map(|current| current.data().clone())
            .unwrap_or_default();
        self.global_components
            .set_slot(slot, Some(GlobalSlot::new(variant, data)));
        self.touch();
    }

    fn set_global_data(&mut self, slot: GlobalSlotKind, data: ComponentData) {
        // The slot's variant is authoritative; without one, fall back to the payload's.
        let variant = match self.global_components.slot(slot) {
            Some(current) => current.variant().to_string(),
            None => match data.get("variant").and_then(Value::as_str) {
                Some(variant) => variant.to_string(),
                None => {
                    tracing::warn!(
                        "Ignoring {} data written before any variant was set",
                        slot.as_str()
                    );
                    return;
                }
            },
        };
        self.global_components
            .set_slot(slot, Some(GlobalSlot::new(variant, data)));
        self.touch();
    }

    fn set_global_components_data(&mut self, record: GlobalComponentsRecord) {
        self.global_components = record;
        self.touch();
    }

    fn ensure_component_variant(&mut self, component_type: &str, key: &str, data: &ComponentData) {
        self.component_states
            .entry(component_type.to_string())
            .or_default()
            .entry(key.to_string())
            .or_insert_with(|| data.clone());
        self.touch();
    }

    fn set_component_data(&mut self, component_type: &str, key: &str, data: ComponentData) {
        self.component_states
            .entry(component_type.to_string())
            .or_default()
            .insert(key.to_string(), data);
        self.touch();
    }

    fn set_current_theme(&mut self, theme: i64) {
        self.current_theme = Some(theme);
        self.theme_change_timestamp = Some(Utc::now().timestamp_millis());
        self.touch();
    }

    fn set_theme_backup(&mut self, key: &str, blob: Option<Value>) {
        match blob {
            Some(blob) => {
                self.website_layout.blobs.insert(key.to_string(), blob);
            }
            None => {
                self.website_layout.blobs.remove(key);
            }
        }
        self.touch();
    }

    fn clear_all_states(&mut self) {
        self.page_components_by_page.clear();
        self.static_pages_data.clear();
        self.global_components = GlobalComponentsRecord::default();
        self.force_update_markers.clear();
        self.touch();
    }

    fn set_website_layout(&mut self, layout: WebsiteLayout) {
        self.website_layout = layout;
        self.touch();
    }

    fn next_force_stamp(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_force_stamp = now.max(self.last_force_stamp + 1);
        self.last_force_stamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> ComponentData {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn force_stamps_strictly_increase() {
        let mut state = EditorState::new();
        let mut last = state.next_force_stamp();
        for _ in 0..100 {
            let next = state.next_force_stamp();
            assert!(next > last);
            last = next;
        }
    }

    #[test]
    fn global_data_keeps_slot_variant() {
        let mut state = EditorState::new();
        state.set_global_variant(GlobalSlotKind::Header, "StaticHeader2");
        state.set_global_data(
            GlobalSlotKind::Header,
            data(json!({ "variant": "StaticHeader9", "logo": "x" })),
        );
        let header = state.global_components().header().unwrap();
        assert_eq!(header.variant(), "StaticHeader2");
        assert_eq!(header.data()["variant"], "StaticHeader2");
        assert_eq!(header.data()["logo"], "x");
    }

    #[test]
    fn global_data_without_variant_is_ignored() {
        let mut state = EditorState::new();
        state.set_global_data(GlobalSlotKind::Footer, data(json!({ "text": "hi" })));
        assert!(state.global_components().footer().is_none());
    }

    #[test]
    fn ensure_variant_does_not_overwrite() {
        let mut state = EditorState::new();
        state.ensure_component_variant("hero", "h1", &data(json!({ "title": "first" })));
        state.ensure_component_variant("hero", "h1", &data(json!({ "title": "second" })));
        assert_eq!(state.component_data("hero", "h1").unwrap()["title"], "first");

        state.set_component_data("hero", "h1", data(json!({ "title": "third" })));
        assert_eq!(state.component_data("hero", "h1").unwrap()["title"], "third");
    }

    #[test]
    fn clear_keeps_layout_and_theme() {
        let mut state = EditorState::new();
        state.set_page_components_for_page("about", Vec::new());
        state.force_update_page_components("home", Vec::new());
        state.set_static_page_data("project", PageDocument::new("project", Vec::new()));
        state.set_global_variant(GlobalSlotKind::Header, "StaticHeader1");
        state.set_theme_backup("Theme1Backup", Some(json!({ "home": [] })));
        state.set_current_theme(1);

        state.clear_all_states();

        assert!(state.page_slugs().is_empty());
        assert!(state.static_page_slugs().is_empty());
        assert!(state.global_components().is_empty());
        assert!(state.force_update_marker("home").is_none());
        assert!(state.layout().blob("Theme1Backup").is_some());
        assert_eq!(state.current_theme(), Some(1));
    }

    #[test]
    fn removing_backup_drops_blob() {
        let mut state = EditorState::new();
        state.set_theme_backup("Theme2Backup", Some(json!({})));
        state.set_theme_backup("Theme2Backup", None);
        assert!(state.layout().blob("Theme2Backup").is_none());
    }
}
