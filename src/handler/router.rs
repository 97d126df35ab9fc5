//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route
//! matching across favicon, static assets, and page tables, plus access
//! logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::handler::{pages, static_files};
use crate::http;
use crate::logger;
use crate::logger::AccessLogEntry;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let is_head = method == Method::HEAD;

    let ctx = RequestContext {
        path: uri.path(),
        query: uri.query(),
        is_head,
        if_none_match: req
            .headers()
            .get("if-none-match")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
    };

    let mut response = if matches!(method, Method::GET | Method::HEAD) {
        dispatch(&ctx, &state).await
    } else {
        logger::log_warning(&format!("Method not allowed: {method}"));
        http::build_405_response()
    };

    if let Ok(server_name) = hyper::header::HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert("Server", server_name);
    }

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        entry.referer = header_string(&req, "referer");
        entry.user_agent = header_string(&req, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Route a GET/HEAD request based on path and configuration.
///
/// Dispatch order: favicon paths, then the static asset prefix, then the
/// page tables. Everything else is a 404.
pub async fn dispatch(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let site = &state.config.site;

    // 1. Favicon routes
    if site.favicon_paths.iter().any(|p| ctx.path == p) {
        return static_files::serve_favicon(ctx, state).await;
    }

    // 2. Static assets
    if let Some(relative) = strip_route_prefix(ctx.path, &site.static_route) {
        return static_files::serve_asset(ctx, relative, state).await;
    }

    // 3. Page routes
    if let Some(page) = pages::find_page(&state.config.blueprints, ctx.path) {
        return pages::serve_page(ctx, &page, state).await;
    }

    http::build_404_response()
}

/// Strip `prefix` off `path` when it matches on a path-segment boundary.
fn strip_route_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let prefix = prefix.trim_end_matches('/');
    let rest = path.strip_prefix(prefix)?;
    if rest.starts_with('/') {
        Some(rest.trim_start_matches('/'))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_route_prefix() {
        assert_eq!(strip_route_prefix("/static/style.css", "/static"), Some("style.css"));
        assert_eq!(
            strip_route_prefix("/static/img/logo.svg", "/static"),
            Some("img/logo.svg")
        );
        // Prefix must end on a segment boundary
        assert_eq!(strip_route_prefix("/staticfile", "/static"), None);
        assert_eq!(strip_route_prefix("/bios", "/static"), None);
    }
}
