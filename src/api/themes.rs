//! Theme API endpoints.

use axum::extract::{Path, State};

use super::{error, parse_theme_number, success, validate_tenant_id, ApiResult};
use crate::editor::{load_theme, ThemeApplied, ThemeReport, ThemeSwitched, SHIPPED_THEMES};
use crate::models::ThemeDefinition;
use crate::AppState;

/// GET /api/themes - List the shipped theme numbers.
pub async fn list_themes() -> ApiResult<Vec<i64>> {
    success(SHIPPED_THEMES.to_vec(), 0)
}

/// GET /api/themes/:n - Get a shipped theme definition.
pub async fn get_theme(Path(number): Path<String>) -> ApiResult<ThemeDefinition> {
    match parse_theme_number(&number).and_then(load_theme) {
        Ok(theme) => success(theme.clone(), 0),
        Err(e) => error(e, 0),
    }
}

/// POST /api/tenants/:tenant/themes/:n/apply - Apply a theme in place.
pub async fn apply_theme(
    State(state): State<AppState>,
    Path((tenant, number)): Path<(String, String)>,
) -> ApiResult<ThemeReport<ThemeApplied>> {
    if let Err(e) = validate_tenant_id(&tenant) {
        return error(e, 0);
    }
    let revision_id = state.editor.revision(&tenant).await;

    let number = match parse_theme_number(&number) {
        Ok(number) => number,
        Err(e) => return error(e, revision_id),
    };

    match state.editor.apply_theme(&tenant, number).await {
        Ok(report) => {
            let new_revision = state.editor.revision(&tenant).await;
            success(report, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/tenants/:tenant/themes/:n/switch - Back up the current theme and switch.
pub async fn switch_theme(
    State(state): State<AppState>,
    Path((tenant, number)): Path<(String, String)>,
) -> ApiResult<ThemeReport<ThemeSwitched>> {
    if let Err(e) = validate_tenant_id(&tenant) {
        return error(e, 0);
    }
    let revision_id = state.editor.revision(&tenant).await;

    let number = match parse_theme_number(&number) {
        Ok(number) => number,
        Err(e) => return error(e, revision_id),
    };

    match state.editor.switch_theme(&tenant, number).await {
        Ok(report) => {
            let new_revision = state.editor.revision(&tenant).await;
            success(report, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
