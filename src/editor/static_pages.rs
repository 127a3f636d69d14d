//! Static page assembler.
//!
//! Static pages are addressed by component name across editor sessions: each
//! descriptor's id is pinned to its `componentName`, its per-variant data is
//! keyed by that name, and every application stamps a fresh re-render tag.

use std::collections::HashSet;

use serde_json::Value;

use super::assemble::{register_components, Assembled};
use super::normalize::normalize;
use super::store::EditorStore;
use crate::models::{PageDocument, PageMeta, RawPageComponents};

/// Page slugs that are rendered from fixed templates rather than tenant pages.
pub const STATIC_PAGE_SLUGS: &[&str] = &["project", "property"];

pub fn is_static_page(slug: &str) -> bool {
    STATIC_PAGE_SLUGS.contains(&slug)
}

/// Normalize a static collection and stamp every descriptor with `stamp`.
///
/// Later records sharing a component name with an earlier one are dropped.
pub fn normalize_static(raw: &RawPageComponents, stamp: i64) -> Assembled {
    let items: Vec<&Value> = match raw {
        RawPageComponents::List(items) => items.iter().collect(),
        RawPageComponents::Map(entries) => entries.iter().map(|(_, fragment)| fragment).collect(),
        RawPageComponents::Empty => Vec::new(),
    };

    let mut assembled = Assembled::default();
    let mut seen = HashSet::new();
    for (index, item) in items.into_iter().enumerate() {
        let result = normalize(item, index, true);
        assembled.warnings.extend(result.warnings);
        let mut descriptor = result.descriptor;
        if !seen.insert(descriptor.id.clone()) {
            assembled
                .warnings
                .push(format!("dropping duplicate static component {}", descriptor.id));
            continue;
        }
        descriptor.force_update = Some(stamp);
        assembled.components.push(descriptor);
    }

    assembled.components.sort_by_key(|d| d.position);
    assembled
}

/// Apply a static page definition to the store.
pub fn assemble_static<S: EditorStore + ?Sized>(store: &mut S, slug: &str, raw: &Value) -> Assembled {
    if !is_static_page(slug) {
        tracing::warn!("Applying {} as a static page although it is not a known static slug", slug);
    }

    let stamp = store.next_force_stamp();
    let assembled = normalize_static(&RawPageComponents::from_page_value(raw), stamp);
    for warning in &assembled.warnings {
        tracing::warn!("Static page {}: {}", slug, warning);
    }

    register_components(store, &assembled.components, |d| d.component_name.as_str());
    store.set_static_page_data(slug, PageDocument::new(slug, assembled.components.clone()));
    update_static_meta(store, slug, stamp);

    tracing::debug!(
        "Applied static page {} with {} components",
        slug,
        assembled.components.len()
    );
    assembled
}

/// Update the meta entry for `slug`, matching by slug or legacy `/slug` path, or append one.
fn update_static_meta<S: EditorStore + ?Sized>(store: &mut S, slug: &str, stamp: i64) {
    let mut layout = store.layout().clone();
    match layout.meta_tags.pages.iter_mut().find(|meta| meta.matches(slug)) {
        Some(meta) => {
            meta.slug = Some(slug.to_string());
            meta.updated_at = Some(stamp);
        }
        None => layout.meta_tags.pages.push(PageMeta {
            slug: Some(slug.to_string()),
            path: Some(format!("/{}", slug)),
            title: title_from_slug(slug),
            description: String::new(),
            updated_at: Some(stamp),
        }),
    }
    store.set_website_layout(layout);
}

fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
