//! REST API module.
//!
//! Tenant-scoped editor routes plus the shipped theme catalogue.

mod backups;
mod document;
mod editor;
mod themes;

pub use backups::*;
pub use document::*;
pub use editor::*;
pub use themes::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub revision_id: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, revision_id: i64) -> Self {
        Self {
            success: true,
            data,
            revision_id,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppErrorWithRevision>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, revision_id: i64) -> ApiResult<T> {
    Ok(ApiResponse::new(data, revision_id))
}

/// Create an error API response.
pub fn error<T: Serialize>(err: crate::errors::AppError, revision_id: i64) -> ApiResult<T> {
    Err(crate::errors::AppErrorWithRevision {
        error: err,
        revision_id,
    })
}

/// Tenant ids are path segments used as store keys; keep them to a safe alphabet.
pub fn validate_tenant_id(tenant_id: &str) -> Result<(), crate::errors::AppError> {
    let valid = !tenant_id.is_empty()
        && tenant_id.len() <= 64
        && tenant_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(crate::errors::AppError::Validation(format!(
            "Invalid tenant id: {}",
            tenant_id
        )))
    }
}

/// Parse a theme number path segment.
pub fn parse_theme_number(raw: &str) -> Result<i64, crate::errors::AppError> {
    raw.parse::<i64>().map_err(|_| {
        crate::errors::AppError::BadRequest(format!("Theme number must be an integer: {}", raw))
    })
}
