//! Database handle construction.
//!
//! # Responsibilities
//! - Build a Postgres connection pool from the database settings
//! - Verify connectivity with a ping before anyone depends on the pool
//!
//! # Design Decisions
//! - Connectivity failure at construction is unrecoverable; the caller
//!   decides how to terminate
//! - Session timezone is set per connection through server options
//! - Pool sizing is fixed; there is no per-deployment tuning surface yet

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};

use crate::config::DatabaseSettingsProvider;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Error type for database handle construction.
#[derive(Debug, thiserror::Error)]
pub enum ConnectivityError {
    #[error("invalid DB_PORT value: {0}")]
    InvalidPort(String),

    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("database ping failed: {0}")]
    Ping(#[source] sqlx::Error),
}

/// Connect to Postgres using the resolved settings and verify the connection
/// with a `SELECT 1` ping.
pub async fn connect<C>(settings: &C) -> Result<PgPool, ConnectivityError>
where
    C: DatabaseSettingsProvider + ?Sized,
{
    let port: u16 = settings
        .db_port()
        .parse()
        .map_err(|_| ConnectivityError::InvalidPort(settings.db_port().to_string()))?;

    let options = PgConnectOptions::new()
        .host(settings.db_host())
        .port(port)
        .username(settings.db_user())
        .password(settings.db_password())
        .database(settings.db_name())
        .ssl_mode(parse_ssl_mode(settings.db_ssl_mode()))
        .options([("TimeZone", settings.db_timezone())]);

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
        .map_err(ConnectivityError::Connect)?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(ConnectivityError::Ping)?;

    tracing::info!(
        host = settings.db_host(),
        database = settings.db_name(),
        "database connection established"
    );
    Ok(pool)
}

fn parse_ssl_mode(mode: &str) -> PgSslMode {
    match mode {
        "disable" => PgSslMode::Disable,
        "allow" => PgSslMode::Allow,
        "prefer" => PgSslMode::Prefer,
        "require" => PgSslMode::Require,
        "verify-ca" => PgSslMode::VerifyCa,
        "verify-full" => PgSslMode::VerifyFull,
        other => {
            tracing::warn!(ssl_mode = other, "unknown DB_SSLMODE, falling back to disable");
            PgSslMode::Disable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseSettings;
    use crate::config::DatabaseSettingsProvider;
    use crate::config::{AppConfig, ServerSettings};

    fn settings(port: &str) -> AppConfig {
        AppConfig {
            server: ServerSettings {
                env: "test".into(),
                name: "TestApp".into(),
                host: "127.0.0.1".into(),
                port: "0".into(),
                base_api_prefix: "/api/v1".into(),
            },
            database: DatabaseSettings {
                host: "localhost".into(),
                port: port.into(),
                user: "postgres".into(),
                password: "1234".into(),
                name: "mydatabase".into(),
                ssl_mode: "disable".into(),
                timezone: "Asia/Bangkok".into(),
            },
        }
    }

    #[tokio::test]
    async fn unparseable_port_is_rejected_before_touching_the_network() {
        let err = connect(&settings("not-a-port")).await.unwrap_err();
        match err {
            ConnectivityError::InvalidPort(value) => assert_eq!(value, "not-a-port"),
            other => panic!("expected InvalidPort, got {other:?}"),
        }
    }

    #[test]
    fn dsn_reflects_the_settings_used_for_the_pool() {
        let cfg = settings("5432");
        assert!(cfg.dsn().contains("sslmode=disable"));
        assert!(cfg.dsn().contains("TimeZone=Asia/Bangkok"));
    }
}
