//! Tenant store repository.
//!
//! Each tenant has exactly one document row; every push replaces it and bumps
//! its version.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{StoredTenantDocument, TenantDocument};

/// Database repository for tenant documents.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a tenant's document.
    pub async fn get_tenant_document(
        &self,
        tenant_id: &str,
    ) -> Result<Option<StoredTenantDocument>, AppError> {
        let row = sqlx::query(
            r#"SELECT tenant_id, component_settings, static_pages_data, global_components_data,
                      current_theme, updated_at, version
               FROM tenant_documents WHERE tenant_id = ?"#,
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(document_from_row).transpose()
    }

    /// Insert or replace a tenant's document.
    pub async fn upsert_tenant_document(
        &self,
        tenant_id: &str,
        document: &TenantDocument,
    ) -> Result<StoredTenantDocument, AppError> {
        let now = Utc::now().to_rfc3339();
        let component_settings = serde_json::to_string(&document.component_settings)?;
        let static_pages_data = serde_json::to_string(&document.static_pages_data)?;
        let global_components_data = serde_json::to_string(&document.global_components_data)?;

        let row = sqlx::query(
            r#"INSERT INTO tenant_documents (
                tenant_id, component_settings, static_pages_data, global_components_data,
                current_theme, updated_at, version
            ) VALUES (?, ?, ?, ?, ?, ?, 1)
            ON CONFLICT(tenant_id) DO UPDATE SET
                component_settings = excluded.component_settings,
                static_pages_data = excluded.static_pages_data,
                global_components_data = excluded.global_components_data,
                current_theme = excluded.current_theme,
                updated_at = excluded.updated_at,
                version = tenant_documents.version + 1
            RETURNING version"#,
        )
        .bind(tenant_id)
        .bind(&component_settings)
        .bind(&static_pages_data)
        .bind(&global_components_data)
        .bind(document.current_theme)
        .bind(&now)
        .fetch_one(&self.pool)
        .await?;

        Ok(StoredTenantDocument {
            tenant_id: tenant_id.to_string(),
            document: document.clone(),
            updated_at: now,
            version: row.get("version"),
        })
    }
}

// Helper functions for row conversion

fn document_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<StoredTenantDocument, AppError> {
    let component_settings: String = row.get("component_settings");
    let static_pages_data: String = row.get("static_pages_data");
    let global_components_data: String = row.get("global_components_data");

    Ok(StoredTenantDocument {
        tenant_id: row.get("tenant_id"),
        document: TenantDocument {
            component_settings: parse_column(&component_settings)?,
            static_pages_data: parse_column(&static_pages_data)?,
            global_components_data: parse_column(&global_components_data)?,
            current_theme: row.get("current_theme"),
        },
        updated_at: row.get("updated_at"),
        version: row.get("version"),
    })
}

fn parse_column<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, AppError> {
    serde_json::from_str(s)
        .map_err(|e| AppError::Internal(format!("Corrupt tenant document column: {}", e)))
}
