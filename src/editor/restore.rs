//! Theme restore orchestrator.
//!
//! Restoring a backup is a single forward pass over the editor store:
//!
//! 1. locate the backup blob (the only fatal step; nothing is mutated before it)
//! 2. parse the theme number out of the backup key
//! 3. clear all page, static page and global state
//! 4. restore static pages, falling back to the theme's shipped static pages
//! 5. replace the global components wholesale
//! 6. restore every ordinary page
//! 7. restore the active theme number
//!
//! [`complete_restore`] runs after a delay: a final force-update of the active
//! page, then the backup is discarded. The editor service pushes the result to
//! the tenant store only after that.

use serde::Serialize;

use super::assemble::apply_page;
use super::backup::Backup;
use super::static_pages::assemble_static;
use super::store::EditorStore;
use super::theme::{load_theme, parse_backup_key};
use crate::errors::AppError;
use crate::models::{ComponentDescriptor, GlobalSlotKind};

/// Summary of a completed restore pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreOutcome {
    pub backup_key: String,
    pub theme: Option<i64>,
    pub pages: Vec<String>,
    pub static_pages: Vec<String>,
    /// True when static pages came from the shipped theme rather than the backup.
    pub static_pages_from_theme: bool,
    pub global_components_restored: bool,
    pub warnings: Vec<String>,
}

/// Restore the editor document from the backup stored under `backup_key`.
pub fn restore_theme<S: EditorStore + ?Sized>(
    store: &mut S,
    backup_key: &str,
) -> Result<RestoreOutcome, AppError> {
    let backup = Backup::from_blob(store.layout().blob(backup_key))
        .ok_or_else(|| AppError::BackupNotFound(backup_key.to_string()))?;

    let mut outcome = RestoreOutcome {
        backup_key: backup_key.to_string(),
        theme: parse_backup_key(backup_key),
        ..Default::default()
    };
    if outcome.theme.is_none() {
        note(
            &mut outcome,
            format!("backup key {} carries no theme number", backup_key),
        );
    }

    store.clear_all_states();

    restore_static_pages(store, &backup, &mut outcome);
    restore_global_components(store, &backup, &mut outcome);

    for (slug, raw) in &backup.pages {
        let assembled = apply_page(store, slug, raw);
        outcome
            .warnings
            .extend(assembled.warnings.into_iter().map(|w| format!("{}: {}", slug, w)));
        outcome.pages.push(slug.clone());
    }

    if let Some(theme) = outcome.theme {
        store.set_current_theme(theme);
    }

    tracing::info!(
        "Restored {} ({} pages, {} static pages, theme {:?})",
        backup_key,
        outcome.pages.len(),
        outcome.static_pages.len(),
        outcome.theme
    );
    Ok(outcome)
}

fn note(outcome: &mut RestoreOutcome, warning: String) {
    tracing::warn!("{}", warning);
    outcome.warnings.push(warning);
}

fn restore_static_pages<S: EditorStore + ?Sized>(
    store: &mut S,
    backup: &Backup,
    outcome: &mut RestoreOutcome,
) {
    if !backup.static_pages.is_empty() {
        for (slug, raw) in &backup.static_pages {
            assemble_static(store, slug, raw);
            outcome.static_pages.push(slug.clone());
        }
        return;
    }

    // Backups taken before static pages existed: fall back to the shipped theme.
    let Some(number) = outcome.theme else {
        note(
            outcome,
            "backup has no static pages and no theme to fall back to".to_string(),
        );
        return;
    };
    match load_theme(number) {
        Ok(theme) => {
            for (slug, raw) in &theme.static_pages {
                assemble_static(store, slug, raw);
                outcome.static_pages.push(slug.clone());
            }
            outcome.static_pages_from_theme = true;
            tracing::debug!("Static pages restored from shipped theme {}", number);
        }
        Err(e) => note(
            outcome,
            format!("static page fallback to theme {} failed: {}", number, e),
        ),
    }
}

fn restore_global_components<S: EditorStore + ?Sized>(
    store: &mut S,
    backup: &Backup,
    outcome: &mut RestoreOutcome,
) {
    let Some(record) = &backup.global_components else {
        note(outcome, "backup has no global components".to_string());
        return;
    };
    if record.is_empty() {
        note(outcome, "backup global components hold no header or footer".to_string());
    }

    store.set_global_components_data(record.clone());
    for kind in [GlobalSlotKind::Header, GlobalSlotKind::Footer] {
        if let Some(slot) = record.slot(kind) {
            store.set_component_data(kind.as_str(), slot.variant(), slot.data().clone());
        }
    }
    outcome.global_components_restored = true;
}

/// Finish a restore once its synchronous pass has settled: one more
/// force-update of the active page, then drop the consumed backup.
pub fn complete_restore<S: EditorStore + ?Sized>(
    store: &mut S,
    backup_key: &str,
) -> Option<(String, usize)> {
    let refreshed = final_force_update(store);
    store.set_theme_backup(backup_key, None);
    tracing::debug!("Discarded backup {}", backup_key);
    refreshed
}

/// Re-issue a force-update for the active page from whichever storage holds it.
///
/// Static page storage wins over ordinary page storage when both hold data for
/// the slug. Returns the slug and component count when an update was issued.
pub fn final_force_update<S: EditorStore + ?Sized>(store: &mut S) -> Option<(String, usize)> {
    let slug = store.current_page()?.to_string();

    let from_static = store
        .static_page_data(&slug)
        .map(|doc| doc.components.clone())
        .filter(|components| !components.is_empty());
    let components: Vec<ComponentDescriptor> = match from_static {
        Some(components) => components,
        None => store
            .page_components(&slug)
            .map(<[ComponentDescriptor]>::to_vec)
            .filter(|components| !components.is_empty())?,
    };

    let count = components.len();
    store.force_update_page_components(&slug, components);
    tracing::debug!("Final force-update of {} with {} components", slug, count);
    Some((slug, count))
}
