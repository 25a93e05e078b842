//! Configuration loading from the environment.
//!
//! The loader merges an optional `.env`-style file into the process
//! environment, then resolves each setting by name with a documented default.
//! Loading runs at most once per [`ConfigLoader`]; concurrent and repeated
//! calls observe the outcome of that single execution.

use std::env;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::config::schema::{AppConfig, DatabaseSettings, ServerSettings};
use crate::config::validation::validate_database_settings;

/// Error type for configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("DB_USER cannot be empty")]
    EmptyDbUser,
}

/// Once-only configuration holder.
///
/// Constructed by the process entry point and consulted through
/// [`ConfigLoader::load`]. There is no ambient global: anything that needs
/// the configuration receives the resulting `Arc<AppConfig>`.
pub struct ConfigLoader {
    outcome: OnceLock<Result<Arc<AppConfig>, ConfigError>>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            outcome: OnceLock::new(),
        }
    }

    /// Load the configuration, reading `env_file` into the process
    /// environment first if given. A missing or unreadable file is not fatal;
    /// the process environment and defaults still apply.
    ///
    /// Only the first call performs any work. Later calls return the cached
    /// value (or the cached error) without touching the environment again.
    pub fn load(&self, env_file: Option<&Path>) -> Result<Arc<AppConfig>, ConfigError> {
        self.outcome
            .get_or_init(|| Self::load_uncached(env_file))
            .clone()
    }

    fn load_uncached(env_file: Option<&Path>) -> Result<Arc<AppConfig>, ConfigError> {
        if let Some(path) = env_file {
            if let Err(err) = dotenvy::from_path(path) {
                tracing::info!(
                    path = %path.display(),
                    error = %err,
                    "env file not found or failed to load; proceeding with \
                     process environment and defaults"
                );
            }
        }

        let server = ServerSettings {
            env: env_or("SERVER_ENV", "development"),
            name: env_or("SERVER_NAME", "MyApp"),
            host: env_or("SERVER_HOST", "0.0.0.0"),
            port: env_or("SERVER_PORT", "8080"),
            base_api_prefix: env_or("SERVER_BASEAPIPREFIX", "/api/v1"),
        };

        let database = DatabaseSettings {
            host: env_or("DB_HOST", "localhost"),
            port: env_or("DB_PORT", "5432"),
            user: env_or("DB_USER", "postgres"),
            password: env_or("DB_PASSWORD", "1234"),
            name: env_or("DB_NAME", "mydatabase"),
            ssl_mode: env_or("DB_SSLMODE", "disable"),
            timezone: env_or("DB_TIMEZONE", "Asia/Bangkok"),
        };

        validate_database_settings(&database)?;

        tracing::info!("application configuration loaded");
        Ok(Arc::new(AppConfig { server, database }))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve one setting: a present-and-non-empty environment value overrides
/// the default; an empty string counts as absent.
fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests mutate shared process environment; serialize them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const KEYS: [&str; 12] = [
        "SERVER_ENV",
        "SERVER_NAME",
        "SERVER_HOST",
        "SERVER_PORT",
        "SERVER_BASEAPIPREFIX",
        "DB_HOST",
        "DB_PORT",
        "DB_USER",
        "DB_PASSWORD",
        "DB_NAME",
        "DB_SSLMODE",
        "DB_TIMEZONE",
    ];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let cfg = ConfigLoader::new().load(None).unwrap();
        assert_eq!(cfg.server.env, "development");
        assert_eq!(cfg.server.name, "MyApp");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, "8080");
        assert_eq!(cfg.server.base_api_prefix, "/api/v1");
        assert_eq!(cfg.database.host, "localhost");
        assert_eq!(cfg.database.port, "5432");
        assert_eq!(cfg.database.user, "postgres");
        assert_eq!(cfg.database.password, "1234");
        assert_eq!(cfg.database.name, "mydatabase");
        assert_eq!(cfg.database.ssl_mode, "disable");
        assert_eq!(cfg.database.timezone, "Asia/Bangkok");
    }

    #[test]
    fn non_empty_environment_values_override_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("SERVER_PORT", "9090");
        env::set_var("DB_NAME", "orders_db");

        let cfg = ConfigLoader::new().load(None).unwrap();
        assert_eq!(cfg.server.port, "9090");
        assert_eq!(cfg.database.name, "orders_db");
        // Untouched settings still fall back.
        assert_eq!(cfg.server.host, "0.0.0.0");

        clear_env();
    }

    #[test]
    fn empty_environment_value_counts_as_absent() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("SERVER_NAME", "");
        env::set_var("DB_SSLMODE", "");

        let cfg = ConfigLoader::new().load(None).unwrap();
        assert_eq!(cfg.server.name, "MyApp");
        assert_eq!(cfg.database.ssl_mode, "disable");

        clear_env();
    }

    #[test]
    fn load_is_idempotent_across_environment_changes() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("SERVER_PORT", "7001");

        let loader = ConfigLoader::new();
        let first = loader.load(None).unwrap();
        assert_eq!(first.server.port, "7001");

        // A later environment change must not be observed.
        env::set_var("SERVER_PORT", "7002");
        for _ in 0..3 {
            let again = loader.load(None).unwrap();
            assert_eq!(again.server.port, "7001");
            assert!(Arc::ptr_eq(&first, &again));
        }

        clear_env();
    }

    #[test]
    fn missing_env_file_is_not_fatal() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let cfg = ConfigLoader::new()
            .load(Some(Path::new("/definitely/not/here/.env")))
            .unwrap();
        assert_eq!(cfg.server.port, "8080");
    }
}
