//! Static asset URL building module
//!
//! Wraps the plain `<route>/<filename>` URL builder with a cache-busting
//! decorator: when the asset exists on disk, its URL gains a `v` query
//! parameter holding the file's Unix modification timestamp. A changed file
//! therefore produces a new URL without any manual version bump.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Builds URLs for files under the static root.
///
/// Constructed once at startup and handed to the template renderer, so every
/// static reference made during rendering goes through the decorator.
#[derive(Debug, Clone)]
pub struct StaticUrlBuilder {
    route_prefix: String,
    static_root: PathBuf,
}

impl StaticUrlBuilder {
    pub fn new(route_prefix: impl Into<String>, static_root: impl Into<PathBuf>) -> Self {
        let mut route_prefix = route_prefix.into();
        while route_prefix.ends_with('/') {
            route_prefix.pop();
        }
        Self {
            route_prefix,
            static_root: static_root.into(),
        }
    }

    /// The undecorated URL for `filename`.
    pub fn base_url(&self, filename: &str) -> String {
        format!("{}/{}", self.route_prefix, filename.trim_start_matches('/'))
    }

    /// The cache-busted URL for `filename`.
    ///
    /// The modification time is re-read on every call, so the URL is stable
    /// while the file is unchanged and moves as soon as it is rewritten.
    /// A filename with no file behind it gets the base URL unchanged; broken
    /// references are a template-authoring concern, not an error here.
    pub fn url_for(&self, filename: &str) -> String {
        let url = self.base_url(filename);
        match file_mtime(&self.static_root.join(filename.trim_start_matches('/'))) {
            Some(version) => format!("{url}?v={version}"),
            None => url,
        }
    }
}

/// Unix modification timestamp of `path` in whole seconds, if the file exists.
fn file_mtime(path: &Path) -> Option<u64> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    modified
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}
