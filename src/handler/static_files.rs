//! Static file serving module
//!
//! Handles static asset loading, MIME type detection, and conditional
//! responses. Cache lifetimes depend on whether the request URL carried a
//! `v` cache-busting parameter.

use std::path::Path;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;

const FAVICON_FILE: &str = "favicon.svg";

/// Serve the site favicon from the static root.
pub async fn serve_favicon(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let path = Path::new(&state.config.site.static_root).join(FAVICON_FILE);
    match fs::read(&path).await {
        Ok(data) => build_static_file_response(ctx, &data, "image/svg+xml"),
        Err(_) => http::build_404_response(),
    }
}

/// Serve a static asset addressed relative to the static root.
pub async fn serve_asset(
    ctx: &RequestContext<'_>,
    relative: &str,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let static_root = &state.config.site.static_root;
    match load_asset(static_root, relative).await {
        Some((content, content_type)) => build_static_file_response(ctx, &content, content_type),
        None => http::build_404_response(),
    }
}

/// Load an asset file, refusing paths that escape the static root.
async fn load_asset(static_root: &str, relative: &str) -> Option<(Vec<u8>, &'static str)> {
    // Drop any traversal components before touching the filesystem
    let clean = relative.replace("..", "");
    let file_path = Path::new(static_root).join(clean.trim_start_matches('/'));

    let static_root_canonical = match Path::new(static_root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{static_root}': {e}"
            ));
            return None;
        }
    };

    // File not found is common (404), no need to log at warning level
    let file_path_canonical = file_path.canonicalize().ok()?;
    if !file_path_canonical.starts_with(&static_root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {relative} -> {}",
            file_path_canonical.display()
        ));
        return None;
    }
    if !file_path_canonical.is_file() {
        return None;
    }

    let content = match fs::read(&file_path_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path_canonical.display()
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(
        file_path_canonical
            .extension()
            .and_then(|e| e.to_str()),
    );

    Some((content, content_type))
}

/// Build an asset response with `ETag` and conditional-request support.
fn build_static_file_response(
    ctx: &RequestContext<'_>,
    data: &[u8],
    content_type: &str,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(data);
    let cache_control = cache::cache_control_for_query(ctx.query);

    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag, cache_control);
    }

    http::response::build_asset_response(
        Bytes::from(data.to_owned()),
        content_type,
        &etag,
        cache_control,
        ctx.is_head,
    )
}
