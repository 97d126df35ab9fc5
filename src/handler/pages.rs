//! Page route module
//!
//! Matches request paths against the blueprint tables and renders the
//! selected template. Routes are pure data: method GET, exact path, one
//! template, no parameters.

use std::path::Path;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::{AppState, Blueprint};
use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;
use crate::render;

/// A matched page route
pub struct PageMatch<'a> {
    /// Blueprint the route belongs to
    pub blueprint: &'a Blueprint,
    /// Template file name to render
    pub template: &'a str,
}

/// Find the page route matching `path` across the blueprint tables.
///
/// The full route path is the blueprint prefix joined with the page path;
/// matching is exact, first match wins.
pub fn find_page<'a>(blueprints: &'a [Blueprint], path: &str) -> Option<PageMatch<'a>> {
    for blueprint in blueprints {
        for page in &blueprint.pages {
            if full_path(&blueprint.url_prefix, &page.path) == path {
                return Some(PageMatch {
                    blueprint,
                    template: &page.template,
                });
            }
        }
    }
    None
}

/// Join a blueprint prefix and a page path into the routed URL path.
fn full_path(prefix: &str, page_path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        page_path.to_string()
    } else if page_path == "/" {
        prefix.to_string()
    } else {
        format!("{prefix}{page_path}")
    }
}

/// Render the matched template and build the page response.
///
/// A declared route with a missing or unreadable template is an authoring
/// error, surfaced as a 500 rather than a 404.
pub async fn serve_page(
    ctx: &RequestContext<'_>,
    page: &PageMatch<'_>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let template_root = page
        .blueprint
        .template_dir
        .as_deref()
        .unwrap_or(&state.config.site.template_root);

    match render::render_template(Path::new(template_root), page.template, &state.urls).await {
        Ok(html) => http::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to render template '{}' for blueprint '{}': {e}",
                page.template, page.blueprint.name
            ));
            http::build_500_response()
        }
    }
}
