use std::sync::Arc;

use presite::config::{AppState, Config, Environment};
use presite::secret::SecretStore;
use presite::{logger, server};

/// Development-only fallback signing key, never offered in production.
const DEV_SECRET_KEY: &str = "dev-secret-key-change-in-production";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    let secret_key = resolve_secret_key(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg, secret_key))
}

async fn async_main(cfg: Config, secret_key: String) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(AppState::new(cfg, secret_key));
    server::run(listener, state).await;
    Ok(())
}

/// Resolve the signing key through the secret chain.
///
/// An unreadable secret file is fatal in every environment; an absent
/// secret is fatal in production, where the compiled-in development default
/// is withheld. Either way the process must not start half-configured.
fn resolve_secret_key(cfg: &Config) -> Result<String, Box<dyn std::error::Error>> {
    let store = SecretStore::new(&cfg.secrets.dir);
    let default = match cfg.server.environment {
        Environment::Development => Some(DEV_SECRET_KEY),
        Environment::Production => None,
    };

    match store.resolve(
        &cfg.secrets.key_name,
        Some(cfg.secrets.key_env.as_str()),
        default,
    ) {
        Ok(Some(key)) => {
            logger::log_secret_source(&secret_source(cfg, &store));
            Ok(key)
        }
        Ok(None) => {
            logger::log_error(&format!(
                "No secret key configured: provide {} or set {}",
                store.secret_path(&cfg.secrets.key_name).display(),
                cfg.secrets.key_env
            ));
            Err("missing required secret key".into())
        }
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read secret file {}: {e}",
                store.secret_path(&cfg.secrets.key_name).display()
            ));
            Err(e.into())
        }
    }
}

/// Name the source the secret came from, for the startup log.
fn secret_source(cfg: &Config, store: &SecretStore) -> String {
    if store.secret_path(&cfg.secrets.key_name).exists() {
        format!("secret file ({})", cfg.secrets.dir)
    } else if std::env::var(&cfg.secrets.key_env).is_ok_and(|v| !v.is_empty()) {
        format!("environment variable {}", cfg.secrets.key_env)
    } else {
        "built-in development default".to_string()
    }
}
