// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub secrets: SecretsConfig,
    #[serde(default = "default_blueprints")]
    pub blueprints: Vec<Blueprint>,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub workers: Option<usize>,
}

/// Deployment environment
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Value of the Server response header
    pub server_name: String,
}

/// Site layout configuration - template and static asset roots
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Directory holding static assets
    #[serde(default = "default_static_root")]
    pub static_root: String,
    /// URL prefix the static directory is served under
    #[serde(default = "default_static_route")]
    pub static_route: String,
    /// Directory holding page templates
    #[serde(default = "default_template_root")]
    pub template_root: String,
    /// Paths answered with the site favicon
    #[serde(default = "default_favicon_paths")]
    pub favicon_paths: Vec<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_static_root() -> String {
    "static".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_static_route() -> String {
    "/static".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_template_root() -> String {
    "templates".to_string()
}

fn default_favicon_paths() -> Vec<String> {
    vec!["/favicon.ico".to_string(), "/favicon.svg".to_string()]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            static_root: default_static_root(),
            static_route: default_static_route(),
            template_root: default_template_root(),
            favicon_paths: default_favicon_paths(),
        }
    }
}

/// Secret resolution configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SecretsConfig {
    /// Directory the orchestrator mounts secret files into
    #[serde(default = "default_secrets_dir")]
    pub dir: String,
    /// Name of the signing-key secret file
    #[serde(default = "default_key_name")]
    pub key_name: String,
    /// Environment variable checked when the secret file is absent
    #[serde(default = "default_key_env")]
    pub key_env: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_secrets_dir() -> String {
    crate::secret::DEFAULT_SECRETS_DIR.to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_key_name() -> String {
    "site_secret_key".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_key_env() -> String {
    "SECRET_KEY".to_string()
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            dir: default_secrets_dir(),
            key_name: default_key_name(),
            key_env: default_key_env(),
        }
    }
}

/// A named group of page routes sharing a URL prefix and template directory
#[derive(Debug, Deserialize, Clone)]
pub struct Blueprint {
    /// Blueprint name, used in logs only
    pub name: String,
    /// URL prefix prepended to every page path ("" for the root blueprint)
    #[serde(default)]
    pub url_prefix: String,
    /// Template directory override; `site.template_root` when absent
    #[serde(default)]
    pub template_dir: Option<String>,
    /// Ordered page routes, matched exactly
    pub pages: Vec<PageRoute>,
}

/// One GET route: URL path within the blueprint to template file name
#[derive(Debug, Deserialize, Clone)]
pub struct PageRoute {
    pub path: String,
    pub template: String,
}

/// Compiled-in route tables: the presentation site's pages plus the
/// development example page. Replaced wholesale by `[[blueprints]]` entries
/// in the config file when present.
pub fn default_blueprints() -> Vec<Blueprint> {
    vec![
        Blueprint {
            name: "site".to_string(),
            url_prefix: String::new(),
            template_dir: None,
            pages: vec![
                page("/", "home.html"),
                page("/bios", "bios.html"),
                page("/feasibility-v1", "feasibility-slides-version-1.html"),
                page("/feasibility-v2", "feasibility-slides-version-2.html"),
                page("/wip-feasibility", "wip-feasibility-slides.html"),
            ],
        },
        Blueprint {
            name: "example".to_string(),
            url_prefix: "/development".to_string(),
            template_dir: Some("templates/examples".to_string()),
            pages: vec![page("/example", "example.html")],
        },
    ]
}

fn page(path: &str, template: &str) -> PageRoute {
    PageRoute {
        path: path.to_string(),
        template: template.to_string(),
    }
}
