//! Theme composition and restore engine.
//!
//! The engine functions are synchronous and operate on anything implementing
//! [`EditorStore`]; [`EditorService`] binds them to per-tenant sessions and the
//! tenant store.

mod apply;
mod assemble;
mod backup;
mod defaults;
mod globals;
mod normalize;
#[cfg(test)]
mod recording;
mod restore;
mod service;
mod static_pages;
mod store;
mod theme;

pub use apply::{ThemeApplied, ThemeSwitched};
pub use service::{EditorService, PageUpdate, RestoreReport, ThemeReport};
pub use store::EditorSnapshot;
pub use theme::{load_theme, SHIPPED_THEMES};
