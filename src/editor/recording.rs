//! Test double that records every store mutation by name.

use serde_json::Value;

use super::store::{EditorState, EditorStore};
use crate::models::{
    ComponentData, ComponentDescriptor, GlobalComponentsRecord, GlobalSlotKind, PageDocument,
    WebsiteLayout,
};

/// Store wrapper that records the name of every mutation.
pub struct RecordingStore {
    pub inner: EditorState,
    pub calls: Vec<&'static str>,
}

impl RecordingStore {
    pub fn new(inner: EditorState) -> Self {
        Self {
            inner,
            calls: Vec::new(),
        }
    }
}

impl EditorStore for RecordingStore {
    fn current_page(&self) -> Option<&str> {
        self.inner.current_page()
    }
    fn current_theme(&self) -> Option<i64> {
        self.inner.current_theme()
    }
    fn page_components(&self, slug: &str) -> Option<&[ComponentDescriptor]> {
        self.inner.page_components(slug)
    }
    fn page_slugs(&self) -> Vec<String> {
        self.inner.page_slugs()
    }
    fn static_page_data(&self, slug: &str) -> Option<&PageDocument> {
        self.inner.static_page_data(slug)
    }
    fn static_page_slugs(&self) -> Vec<String> {
        self.inner.static_page_slugs()
    }
    fn global_components(&self) -> &GlobalComponentsRecord {
        self.inner.global_components()
    }
    fn component_data(&self, component_type: &str, key: &str) -> Option<&ComponentData> {
        self.inner.component_data(component_type, key)
    }
    fn layout(&self) -> &WebsiteLayout {
        self.inner.layout()
    }
    fn set_current_page(&mut self, slug: &str) {
        self.calls.push("set_current_page");
        self.inner.set_current_page(slug)
    }
    fn set_page_components_for_page(&mut self, slug: &str, components: Vec<ComponentDescriptor>) {
        self.calls.push("set_page_components_for_page");
        self.inner.set_page_components_for_page(slug, components)
    }
    fn force_update_page_components(&mut self, slug: &str, components: Vec<ComponentDescriptor>) {
        self.calls.push("force_update_page_components");
        self.inner.force_update_page_components(slug, components)
    }
    fn set_static_page_data(&mut self, slug: &str, doc: PageDocument) {
        self.calls.push("set_static_page_data");
        self.inner.set_static_page_data(slug, doc)
    }
    fn set_global_variant(&mut self, slot: GlobalSlotKind, variant: &str) {
        self.calls.push("set_global_variant");
        self.inner.set_global_variant(slot, variant)
    }
    fn set_global_data(&mut self, slot: GlobalSlotKind, data: ComponentData) {
        self.calls.push("set_global_data");
        self.inner.set_global_data(slot, data)
    }
    fn set_global_components_data(&mut self, record: GlobalComponentsRecord) {
        self.calls.push("set_global_components_data");
        self.inner.set_global_components_data(record)
    }
    fn ensure_component_variant(&mut self, component_type: &str, key: &str, data: &ComponentData) {
        self.calls.push("ensure_component_variant");
        self.inner.ensure_component_variant(component_type, key, data)
    }
    fn set_component_data(&mut self, component_type: &str, key: &str, data: ComponentData) {
        self.calls.push("set_component_data");
        self.inner.set_component_data(component_type, key, data)
    }
    fn set_current_theme(&mut self, theme: i64) {
        self.calls.push("set_current_theme");
        self.inner.set_current_theme(theme)
    }
    fn set_theme_backup(&mut self, key: &str, blob: Option<Value>) {
        self.calls.push("set_theme_backup");
        self.inner.set_theme_backup(key, blob)
    }
    fn clear_all_states(&mut self) {
        self.calls.push("clear_all_states");
        self.inner.clear_all_states()
    }
    fn set_website_layout(&mut self, layout: WebsiteLayout) {
        self.calls.push("set_website_layout");
        self.inner.set_website_layout(layout)
    }
    fn next_force_stamp(&mut self) -> i64 {
        self.inner.next_force_stamp()
    }
}
