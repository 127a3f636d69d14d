//! Theme application and theme switching.

use serde::Serialize;

use super::assemble::apply_page;
use super::backup::capture_backup;
use super::globals::apply_globals;
use super::static_pages::assemble_static;
use super::store::EditorStore;
use super::theme::{load_theme, make_backup_key};
use crate::errors::AppError;
use crate::models::ThemeDefinition;

/// What a theme application touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeApplied {
    pub pages: Vec<String>,
    pub static_pages: Vec<String>,
    pub warnings: Vec<String>,
}

/// Apply a theme: globals, then static pages, then ordinary pages.
///
/// Pages the theme does not mention are left as they are.
pub fn apply_theme<S: EditorStore + ?Sized>(store: &mut S, theme: &ThemeDefinition) -> ThemeApplied {
    let mut applied = ThemeApplied::default();

    apply_globals(store, theme.global_components_data.as_ref());

    for (slug, raw) in &theme.static_pages {
        let assembled = assemble_static(store, slug, raw);
        applied.warnings.extend(
            assembled
                .warnings
                .into_iter()
                .map(|w| format!("{}: {}", slug, w)),
        );
        applied.static_pages.push(slug.clone());
    }

    for (slug, raw) in &theme.pages {
        let assembled = apply_page(store, slug, raw);
        applied.warnings.extend(
            assembled
                .warnings
                .into_iter()
                .map(|w| format!("{}: {}", slug, w)),
        );
        applied.pages.push(slug.clone());
    }

    applied
}

/// Result of a theme switch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSwitched {
    pub theme: i64,
    pub backup_key: Option<String>,
    pub applied: ThemeApplied,
}

/// Back up the current document under the active theme's key, then apply `number`.
pub fn switch_theme<S: EditorStore + ?Sized>(
    store: &mut S,
    number: i64,
) -> Result<ThemeSwitched, AppError> {
    let theme = load_theme(number)?;

    let backup_key = make_backup_key(store.current_theme());
    match &backup_key {
        Some(key) => {
            let blob = capture_backup(store)?;
            store.set_theme_backup(key, Some(blob));
            tracing::info!("Stored backup {} before switching to theme {}", key, number);
        }
        None => tracing::warn!("No active theme; switching to theme {} without a backup", number),
    }

    let applied = apply_theme(store, theme);
    store.set_current_theme(number);

    Ok(ThemeSwitched {
        theme: number,
        backup_key,
        applied,
    })
}
