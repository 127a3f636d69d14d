//! Tenant-store document endpoint.

use axum::extract::{Path, State};

use super::{error, success, validate_tenant_id, ApiResult};
use crate::errors::AppError;
use crate::models::StoredTenantDocument;
use crate::AppState;

/// GET /api/tenants/:tenant/document - Get the document the live preview renders from.
pub async fn get_tenant_document(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
) -> ApiResult<StoredTenantDocument> {
    if let Err(e) = validate_tenant_id(&tenant) {
        return error(e, 0);
    }
    let revision_id = state.editor.revision(&tenant).await;

    match state.editor.tenant_document(&tenant).await {
        Ok(Some(document)) => success(document, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("No tenant document for {}", tenant)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}
