//! The persisted website layout record.
//!
//! Besides SEO metadata the record carries arbitrary named blobs; theme backups
//! live there under their derived key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// SEO/meta entry for one page.
///
/// Older records identify the page by `path` (`/slug`) instead of `slug`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl PageMeta {
    /// True when this entry describes `slug`, either directly or via its legacy path.
    pub fn matches(&self, slug: &str) -> bool {
        self.slug.as_deref() == Some(slug)
            || self
                .path
                .as_deref()
                .and_then(|path| path.strip_prefix('/'))
                .is_some_and(|rest| rest == slug)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaTags {
    #[serde(default)]
    pub pages: Vec<PageMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteLayout {
    #[serde(default)]
    pub meta_tags: MetaTags,
    /// Named blobs, including theme backups.
    #[serde(flatten)]
    pub blobs: Map<String, Value>,
}

impl WebsiteLayout {
    pub fn blob(&self, key: &str) -> Option<&Value> {
        self.blobs.get(key)
    }
}
