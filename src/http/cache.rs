//! HTTP cache control module
//!
//! Provides `ETag` generation and conditional request handling for static
//! assets. Versioned asset URLs (the `v` cache-busting parameter) get a
//! long immutable lifetime; everything else gets a short one.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Cache-Control for URLs carrying a `v` version parameter. The URL changes
/// whenever the file does, so the response can be cached indefinitely.
pub const CACHE_CONTROL_VERSIONED: &str = "public, max-age=31536000, immutable";

/// Cache-Control for unversioned asset URLs.
pub const CACHE_CONTROL_DEFAULT: &str = "public, max-age=3600";

/// Generate `ETag` using fast hashing
///
/// # Arguments
/// * `content` - File content
///
/// # Returns
/// Quoted `ETag` string, e.g., `"abc123def"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Supports:
/// - Single `ETag`: `"abc123"`
/// - Multiple `ETags`: `"abc123", "def456"`
/// - Wildcard: `*`
///
/// # Returns
/// Returns true if matched (should return 304), false otherwise
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        // Handle multiple ETags separated by comma
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

/// Cache-Control value for a request query string: versioned asset URLs
/// (`?v=...`) are immutable, everything else is short-lived.
pub fn cache_control_for_query(query: Option<&str>) -> &'static str {
    let versioned = query.is_some_and(|q| {
        q.split('&')
            .any(|pair| pair.strip_prefix("v=").is_some_and(|v| !v.is_empty()))
    });
    if versioned {
        CACHE_CONTROL_VERSIONED
    } else {
        CACHE_CONTROL_DEFAULT
    }
}
