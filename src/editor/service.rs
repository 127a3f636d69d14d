//! Per-tenant editor sessions.
//!
//! Each tenant owns one in-memory [`EditorState`] behind an async mutex. The
//! service sequences the engine's synchronous passes with the asynchronous tail
//! of a restore: after a delay, the final force-update, the backup discard and
//! the one-way push into the tenant store run in that order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::apply::{apply_theme, switch_theme, ThemeApplied, ThemeSwitched};
use super::assemble::{apply_page, Assembled};
use super::globals::change_global_variant;
use super::restore::{complete_restore, restore_theme, RestoreOutcome};
use super::store::{EditorSnapshot, EditorState, EditorStore};
use super::theme::load_theme;
use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{
    ComponentData, ComponentDescriptor, GlobalSlotKind, StoredTenantDocument, TenantDocument,
    WebsiteLayout,
};

/// One tenant's editor document plus its theme operation generation.
///
/// The generation only changes while the state lock is held.
pub struct EditorSession {
    state: Mutex<EditorState>,
    generation: AtomicU64,
}

impl EditorSession {
    pub fn new(state: EditorState) -> Self {
        Self {
            state: Mutex::new(state),
            generation: AtomicU64::new(0),
        }
    }

    /// Start a new generation, invalidating pending deferred passes.
    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    pub async fn snapshot(&self) -> EditorSnapshot {
        self.state.lock().await.snapshot()
    }
}

/// A restore whose synchronous pass has run and whose tail is still pending.
#[derive(Debug, Clone)]
pub struct PendingRestore {
    pub restore_id: Uuid,
    pub tenant_id: String,
    pub backup_key: String,
    pub generation: u64,
}

/// How the deferred tail of a restore ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalRefresh {
    /// A newer theme operation started first; nothing was written.
    Superseded,
    Applied { tenant_synced: bool },
}

/// After `delay`, finish `pending` and push the restored document to the tenant
/// store, unless a newer theme operation started meanwhile.
pub fn schedule_final_refresh(
    session: Arc<EditorSession>,
    repo: Arc<Repository>,
    pending: PendingRestore,
    delay: Duration,
) -> JoinHandle<FinalRefresh> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if !session.is_current(pending.generation) {
            tracing::debug!(
                "Skipping superseded final refresh of restore {}",
                pending.restore_id
            );
            return FinalRefresh::Superseded;
        }

        let mut state = session.state.lock().await;
        if !session.is_current(pending.generation) {
            tracing::debug!(
                "Restore {} superseded while waiting for the session",
                pending.restore_id
            );
            return FinalRefresh::Superseded;
        }

        complete_restore(&mut *state, &pending.backup_key);
        let document = state.tenant_document();
        // Guard stays held so a newer operation cannot sync in between.
        let tenant_synced = sync_tenant(&repo, &pending.tenant_id, &document).await;
        drop(state);

        tracing::info!(
            "Restore {} finished (generation {}, tenant synced: {})",
            pending.restore_id,
            pending.generation,
            tenant_synced
        );
        FinalRefresh::Applied { tenant_synced }
    })
}

async fn sync_tenant(repo: &Repository, tenant_id: &str, document: &TenantDocument) -> bool {
    match repo.upsert_tenant_document(tenant_id, document).await {
        Ok(stored) => {
            tracing::debug!(
                "Synced tenant {} document (version {})",
                tenant_id,
                stored.version
            );
            true
        }
        Err(e) => {
            tracing::error!("Failed to sync tenant {} document: {}", tenant_id, e);
            false
        }
    }
}

/// Result of a page write.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageUpdate {
    pub slug: String,
    pub components: Vec<ComponentDescriptor>,
    pub warnings: Vec<String>,
}

impl PageUpdate {
    fn new(slug: &str, assembled: Assembled) -> Self {
        Self {
            slug: slug.to_string(),
            components: assembled.components,
            warnings: assembled.warnings,
        }
    }
}

/// Result of applying a theme to a tenant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeReport<T: Serialize> {
    #[serde(flatten)]
    pub result: T,
    pub tenant_synced: bool,
}

/// Result of the synchronous part of a restore.
///
/// The tenant store is updated once the final refresh runs, `finalRefreshMs`
/// after this report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreReport {
    pub restore_id: Uuid,
    #[serde(flatten)]
    pub outcome: RestoreOutcome,
    pub generation: u64,
    pub final_refresh_ms: u64,
}

/// Owns every tenant's editor session and the tenant store they sync into.
pub struct EditorService {
    sessions: RwLock<HashMap<String, Arc<EditorSession>>>,
    repo: Arc<Repository>,
    refresh_delay: Duration,
}

impl EditorService {
    pub fn new(repo: Arc<Repository>, refresh_delay: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            repo,
            refresh_delay,
        }
    }

    /// Get the tenant's session, creating an empty one on first use.
    pub async fn session(&self, tenant_id: &str) -> Arc<EditorSession> {
        if let Some(session) = self.sessions.read().await.get(tenant_id) {
            return Arc::clone(session);
        }
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(tenant_id.to_string()).or_insert_with(|| {
            tracing::info!("Opening editor session for tenant {}", tenant_id);
            Arc::new(EditorSession::new(EditorState::new()))
        });
        Arc::clone(session)
    }

    /// Current mutation revision of the tenant's editor store.
    pub async fn revision(&self, tenant_id: &str) -> i64 {
        self.session(tenant_id).await.state.lock().await.revision()
    }

    pub async fn snapshot(&self, tenant_id: &str) -> EditorSnapshot {
        self.session(tenant_id).await.snapshot().await
    }

    pub async fn set_current_page(&self, tenant_id: &str, slug: &str) -> EditorSnapshot {
        let session = self.session(tenant_id).await;
        let mut state = session.state.lock().await;
        state.set_current_page(slug);
        state.snapshot()
    }

    pub async fn set_page_components(&self, tenant_id: &str, slug: &str, raw: &Value) -> PageUpdate {
        let session = self.session(tenant_id).await;
        let mut state = session.state.lock().await;
        PageUpdate::new(slug, apply_page(&mut *state, slug, raw))
    }

    pub async fn set_website_layout(&self, tenant_id: &str, layout: WebsiteLayout) -> WebsiteLayout {
        let session = self.session(tenant_id).await;
        let mut state = session.state.lock().await;
        state.set_website_layout(layout);
        state.layout().clone()
    }

    pub async fn change_global_variant(
        &self,
        tenant_id: &str,
        kind: GlobalSlotKind,
        variant: &str,
        overrides: &ComponentData,
    ) -> ComponentData {
        let session = self.session(tenant_id).await;
        let mut state = session.state.lock().await;
        change_global_variant(&mut *state, kind, variant, overrides)
    }

    /// Apply a shipped theme in place (no backup) and sync the tenant store.
    pub async fn apply_theme(
        &self,
        tenant_id: &str,
        number: i64,
    ) -> Result<ThemeReport<ThemeApplied>, AppError> {
        let theme = load_theme(number)?;
        let session = self.session(tenant_id).await;
        let mut state = session.state.lock().await;
        session.next_generation();
        let applied = apply_theme(&mut *state, theme);
        state.set_current_theme(number);
        let tenant_synced = sync_tenant(&self.repo, tenant_id, &state.tenant_document()).await;
        Ok(ThemeReport {
            result: applied,
            tenant_synced,
        })
    }

    /// Back up the current document, switch to a shipped theme and sync the tenant store.
    pub async fn switch_theme(
        &self,
        tenant_id: &str,
        number: i64,
    ) -> Result<ThemeReport<ThemeSwitched>, AppError> {
        let session = self.session(tenant_id).await;
        let mut state = session.state.lock().await;
        let switched = switch_theme(&mut *state, number)?;
        session.next_generation();
        let tenant_synced = sync_tenant(&self.repo, tenant_id, &state.tenant_document()).await;
        Ok(ThemeReport {
            result: switched,
            tenant_synced,
        })
    }

    /// Run a restore's synchronous pass and schedule its deferred tail.
    pub async fn restore(&self, tenant_id: &str, backup_key: &str) -> Result<RestoreReport, AppError> {
        self.start_restore(tenant_id, backup_key)
            .await
            .map(|(report, _)| report)
    }

    async fn start_restore(
        &self,
        tenant_id: &str,
        backup_key: &str,
    ) -> Result<(RestoreReport, JoinHandle<FinalRefresh>), AppError> {
        let restore_id = Uuid::new_v4();
        tracing::info!(
            "Restore {} started for tenant {} from {}",
            restore_id,
            tenant_id,
            backup_key
        );

        let session = self.session(tenant_id).await;
        let (outcome, generation) = {
            let mut state = session.state.lock().await;
            let outcome = restore_theme(&mut *state, backup_key).map_err(|e| {
                tracing::warn!("Restore {} aborted: {}", restore_id, e);
                e
            })?;
            (outcome, session.next_generation())
        };

        let pending = PendingRestore {
            restore_id,
            tenant_id: tenant_id.to_string(),
            backup_key: backup_key.to_string(),
            generation,
        };
        let handle = schedule_final_refresh(
            Arc::clone(&session),
            Arc::clone(&self.repo),
            pending,
            self.refresh_delay,
        );

        let report = RestoreReport {
            restore_id,
            outcome,
            generation,
            final_refresh_ms: self.refresh_delay.as_millis() as u64,
        };
        Ok((report, handle))
    }

    pub async fn tenant_document(
        &self,
        tenant_id: &str,
    ) -> Result<Option<StoredTenantDocument>, AppError> {
        self.repo.get_tenant_document(tenant_id).await
    }
}
