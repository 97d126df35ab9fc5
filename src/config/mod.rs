// Configuration module entry point
// Loads layered configuration and holds the read-only application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Blueprint, Config, Environment, HttpConfig, LoggingConfig, PageRoute, PerformanceConfig,
    SecretsConfig, ServerConfig, SiteConfig,
};

impl Config {
    /// Load configuration from "config.toml" in the working directory.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SITE").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.environment", "development")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "Presite/0.1")?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        cfg.apply_deployment_env();
        Ok(cfg)
    }

    /// Apply the deployment conventions carried in plain environment
    /// variables: `PORT` overrides the listener port, `APP_ENV=production`
    /// forces production mode.
    fn apply_deployment_env(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if std::env::var("APP_ENV").as_deref() == Ok("production") {
            self.server.environment = Environment::Production;
        }
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reproduce_site_routes() {
        let blueprints = types::default_blueprints();
        assert_eq!(blueprints.len(), 2);

        let site = &blueprints[0];
        assert_eq!(site.url_prefix, "");
        assert!(site.pages.iter().any(|p| p.path == "/" && p.template == "home.html"));
        assert!(site.pages.iter().any(|p| p.path == "/bios"));

        let example = &blueprints[1];
        assert_eq!(example.url_prefix, "/development");
        assert_eq!(example.pages[0].template, "example.html");
    }

    #[test]
    fn test_site_defaults() {
        let site = SiteConfig::default();
        assert_eq!(site.static_root, "static");
        assert_eq!(site.static_route, "/static");
        assert_eq!(site.template_root, "templates");
        assert_eq!(site.favicon_paths.len(), 2);
    }

    #[test]
    fn test_secrets_defaults() {
        let secrets = SecretsConfig::default();
        assert_eq!(secrets.dir, "/run/secrets");
        assert_eq!(secrets.key_name, "site_secret_key");
        assert_eq!(secrets.key_env, "SECRET_KEY");
    }
}
