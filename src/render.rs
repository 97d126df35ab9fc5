//! Template rendering module
//!
//! A "template" here is a plain HTML file; rendering reads it and expands
//! `{{ static "filename" }}` tokens into cache-busted asset URLs through the
//! `StaticUrlBuilder`. No other context reaches a template.

use std::io;
use std::path::Path;

use tokio::fs;

use crate::urls::StaticUrlBuilder;

/// Render a named template from `template_root`.
///
/// A missing or unreadable template file is the caller's error to surface;
/// a declared route pointing at a missing template is an authoring bug, not
/// a 404.
pub async fn render_template(
    template_root: &Path,
    name: &str,
    urls: &StaticUrlBuilder,
) -> io::Result<String> {
    let source = fs::read_to_string(template_root.join(name)).await?;
    Ok(expand_static_tokens(&source, urls))
}

/// Expand every `{{ static "filename" }}` token through the URL builder.
///
/// Anything between braces that does not parse as a static token is left
/// verbatim, along with unbalanced braces.
pub fn expand_static_tokens(source: &str, urls: &StaticUrlBuilder) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        let Some(end) = rest[start..].find("}}") else {
            break;
        };
        let token = &rest[start + 2..start + end];

        out.push_str(&rest[..start]);
        match parse_static_token(token) {
            Some(filename) => out.push_str(&urls.url_for(filename)),
            None => {
                // Not ours, keep the braces as written
                out.push_str(&rest[start..start + end + 2]);
            }
        }
        rest = &rest[start + end + 2..];
    }

    out.push_str(rest);
    out
}

/// Parse the inside of a token: `static "filename"` with optional whitespace.
fn parse_static_token(token: &str) -> Option<&str> {
    let token = token.trim();
    let arg = token.strip_prefix("static")?.trim();
    let arg = arg.strip_prefix('"')?.strip_suffix('"')?;
    if arg.is_empty() || arg.contains('"') {
        return None;
    }
    Some(arg)
}
