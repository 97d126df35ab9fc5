//! Startup secret resolution module
//!
//! Resolves a named secret from an orchestrator-provided secret file,
//! falling back to an environment variable, then to a literal default.
//! Resolution happens once at startup; the result lives in `AppState`.

use std::io;
use std::path::PathBuf;

/// Conventional directory for orchestrator-mounted secret files.
pub const DEFAULT_SECRETS_DIR: &str = "/run/secrets";

/// Resolves secrets from a well-known directory of secret files.
#[derive(Debug, Clone)]
pub struct SecretStore {
    dir: PathBuf,
}

impl Default for SecretStore {
    fn default() -> Self {
        Self::new(DEFAULT_SECRETS_DIR)
    }
}

impl SecretStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve a secret by name.
    ///
    /// Precedence is strict:
    /// 1. `<dir>/<name>` — file contents, whitespace-trimmed. An existing but
    ///    unreadable file is an error; it must not fall through to a weaker
    ///    source.
    /// 2. `env_var` — only if set to a non-empty value. Empty counts as unset.
    /// 3. `default` — returned as-is, `None` meaning "no secret configured".
    ///
    /// Each call re-reads the file; nothing is cached here.
    pub fn resolve(
        &self,
        name: &str,
        env_var: Option<&str>,
        default: Option<&str>,
    ) -> io::Result<Option<String>> {
        let path = self.secret_path(name);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            return Ok(Some(contents.trim().to_string()));
        }

        if let Some(var) = env_var {
            if let Ok(value) = std::env::var(var) {
                if !value.is_empty() {
                    return Ok(Some(value));
                }
            }
        }

        Ok(default.map(ToString::to_string))
    }

    /// Path of the secret file for `name`.
    pub fn secret_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}
