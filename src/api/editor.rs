//! Editor store API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use super::{error, success, validate_tenant_id, ApiResult};
use crate::editor::{EditorSnapshot, PageUpdate};
use crate::errors::AppError;
use crate::models::{
    ChangeGlobalVariantRequest, ComponentData, GlobalSlotKind, SetCurrentPageRequest,
    WebsiteLayout,
};
use crate::AppState;

/// GET /api/tenants/:tenant/editor - Get the tenant's editor snapshot.
pub async fn get_editor(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
) -> ApiResult<EditorSnapshot> {
    if let Err(e) = validate_tenant_id(&tenant) {
        return error(e, 0);
    }
    let snapshot = state.editor.snapshot(&tenant).await;
    let revision_id = snapshot.revision;
    success(snapshot, revision_id)
}

/// PUT /api/tenants/:tenant/editor/current-page - Change the active page.
pub async fn set_current_page(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
    Json(request): Json<SetCurrentPageRequest>,
) -> ApiResult<EditorSnapshot> {
    if let Err(e) = validate_tenant_id(&tenant) {
        return error(e, 0);
    }
    if request.slug.trim().is_empty() {
        let revision_id = state.editor.revision(&tenant).await;
        return error(
            AppError::Validation("Page slug is required".to_string()),
            revision_id,
        );
    }

    let snapshot = state.editor.set_current_page(&tenant, &request.slug).await;
    let revision_id = snapshot.revision;
    success(snapshot, revision_id)
}

/// PUT /api/tenants/:tenant/editor/pages/:slug - Assemble and store a page's components.
///
/// Accepts the list shape, the keyed-map shape, or a `{components: ...}` envelope.
pub async fn set_page_components(
    State(state): State<AppState>,
    Path((tenant, slug)): Path<(String, String)>,
    Json(raw): Json<Value>,
) -> ApiResult<PageUpdate> {
    if let Err(e) = validate_tenant_id(&tenant) {
        return error(e, 0);
    }

    let raw = match raw.get("components") {
        Some(inner @ (Value::Array(_) | Value::Object(_))) => inner.clone(),
        _ => raw,
    };

    let update = state.editor.set_page_components(&tenant, &slug, &raw).await;
    let revision_id = state.editor.revision(&tenant).await;
    success(update, revision_id)
}

/// PUT /api/tenants/:tenant/editor/layout - Replace the website layout.
pub async fn set_website_layout(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
    Json(layout): Json<WebsiteLayout>,
) -> ApiResult<WebsiteLayout> {
    if let Err(e) = validate_tenant_id(&tenant) {
        return error(e, 0);
    }

    let layout = state.editor.set_website_layout(&tenant, layout).await;
    let revision_id = state.editor.revision(&tenant).await;
    success(layout, revision_id)
}

/// PUT /api/tenants/:tenant/editor/globals/:slot - Switch a header or footer variant.
pub async fn change_global_variant(
    State(state): State<AppState>,
    Path((tenant, slot)): Path<(String, String)>,
    Json(request): Json<ChangeGlobalVariantRequest>,
) -> ApiResult<ComponentData> {
    if let Err(e) = validate_tenant_id(&tenant) {
        return error(e, 0);
    }
    let revision_id = state.editor.revision(&tenant).await;

    let Some(kind) = GlobalSlotKind::from_str(&slot) else {
        return error(
            AppError::Validation(format!("Unknown global slot: {}", slot)),
            revision_id,
        );
    };
    if request.variant.trim().is_empty() {
        return error(
            AppError::Validation("Variant is required".to_string()),
            revision_id,
        );
    }

    let merged = state
        .editor
        .change_global_variant(&tenant, kind, &request.variant, &request.overrides)
        .await;
    let new_revision = state.editor.revision(&tenant).await;
    success(merged, new_revision)
}
