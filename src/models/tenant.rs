//! Tenant-store document read by the live preview.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ComponentDescriptor, GlobalComponentsRecord, PageDocument};

/// Document pushed one-way from the editor store into the tenant store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDocument {
    #[serde(default)]
    pub component_settings: BTreeMap<String, Vec<ComponentDescriptor>>,
    #[serde(default)]
    pub static_pages_data: BTreeMap<String, PageDocument>,
    #[serde(default)]
    pub global_components_data: GlobalComponentsRecord,
    #[serde(default)]
    pub current_theme: Option<i64>,
}

/// A stored tenant document with its bookkeeping columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTenantDocument {
    pub tenant_id: String,
    pub document: TenantDocument,
    pub updated_at: String,
    pub version: i64,
}
