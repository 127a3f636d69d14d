//! Backup API endpoints.

use axum::extract::{Path, State};

use super::{error, success, validate_tenant_id, ApiResult};
use crate::editor::RestoreReport;
use crate::errors::AppError;
use crate::AppState;

/// POST /api/tenants/:tenant/backups/:key/restore - Restore the editor from a backup.
pub async fn restore_backup(
    State(state): State<AppState>,
    Path((tenant, key)): Path<(String, String)>,
) -> ApiResult<RestoreReport> {
    if let Err(e) = validate_tenant_id(&tenant) {
        return error(e, 0);
    }
    let revision_id = state.editor.revision(&tenant).await;

    if key.trim().is_empty() {
        return error(
            AppError::Validation("Backup key is required".to_string()),
            revision_id,
        );
    }

    match state.editor.restore(&tenant, &key).await {
        Ok(report) => {
            let new_revision = state.editor.revision(&tenant).await;
            success(report, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
