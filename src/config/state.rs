// Application state module
// Read-only process-wide state, built once at startup

use crate::urls::StaticUrlBuilder;

use super::types::Config;

/// Application state shared across request-handling tasks.
///
/// Everything here is resolved at startup and read-only afterwards; requests
/// never coordinate through shared mutable state.
pub struct AppState {
    pub config: Config,
    /// Signing key resolved through the secret chain at startup
    pub secret_key: String,
    /// Cache-busting static URL builder used by the template renderer
    pub urls: StaticUrlBuilder,
}

impl AppState {
    pub fn new(config: Config, secret_key: String) -> Self {
        let urls = StaticUrlBuilder::new(
            config.site.static_route.clone(),
            config.site.static_root.clone(),
        );
        Self {
            config,
            secret_key,
            urls,
        }
    }
}
