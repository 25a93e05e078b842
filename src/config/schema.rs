//! Configuration schema definitions.
//!
//! Settings are split into server and database halves, aggregated by
//! [`AppConfig`]. Consumers depend on the capability traits below rather than
//! the concrete structs: the traits expose read accessors only, which keeps
//! every consumer oblivious to where the values came from and lets tests
//! substitute a double.

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Deployment environment name (e.g. "development", "production").
    pub env: String,

    /// Human-readable application name, used in startup logs.
    pub name: String,

    /// Bind host (e.g. "0.0.0.0").
    pub host: String,

    /// Bind port, kept textual; it is only ever joined into a bind address.
    pub port: String,

    /// Path prefix all versioned routes mount under (e.g. "/api/v1").
    pub base_api_prefix: String,
}

/// Relational database settings.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    pub timezone: String,
}

/// Aggregate configuration, created at most once per [`ConfigLoader`] and
/// shared read-only for the life of the process.
///
/// [`ConfigLoader`]: crate::config::ConfigLoader
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

/// Read-only access to server settings.
pub trait ServerSettingsProvider {
    fn server_env(&self) -> &str;
    fn server_name(&self) -> &str;
    fn server_host(&self) -> &str;
    fn server_port(&self) -> &str;
    fn base_api_prefix(&self) -> &str;
}

/// Read-only access to database settings.
pub trait DatabaseSettingsProvider {
    fn db_host(&self) -> &str;
    fn db_port(&self) -> &str;
    fn db_user(&self) -> &str;
    fn db_password(&self) -> &str;
    fn db_name(&self) -> &str;
    fn db_ssl_mode(&self) -> &str;
    fn db_timezone(&self) -> &str;

    /// Connection descriptor assembled from the database settings.
    ///
    /// Consumed only by the database constructor; the individual getters
    /// remain the source of truth for everything else.
    fn dsn(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode={} TimeZone={}",
            self.db_host(),
            self.db_port(),
            self.db_user(),
            self.db_password(),
            self.db_name(),
            self.db_ssl_mode(),
            self.db_timezone(),
        )
    }
}

/// Full configuration capability: both halves together.
pub trait ConfigProvider: ServerSettingsProvider + DatabaseSettingsProvider {}

impl<T: ServerSettingsProvider + DatabaseSettingsProvider> ConfigProvider for T {}

impl ServerSettingsProvider for AppConfig {
    fn server_env(&self) -> &str {
        &self.server.env
    }

    fn server_name(&self) -> &str {
        &self.server.name
    }

    fn server_host(&self) -> &str {
        &self.server.host
    }

    fn server_port(&self) -> &str {
        &self.server.port
    }

    fn base_api_prefix(&self) -> &str {
        &self.server.base_api_prefix
    }
}

impl DatabaseSettingsProvider for AppConfig {
    fn db_host(&self) -> &str {
        &self.database.host
    }

    fn db_port(&self) -> &str {
        &self.database.port
    }

    fn db_user(&self) -> &str {
        &self.database.user
    }

    fn db_password(&self) -> &str {
        &self.database.password
    }

    fn db_name(&self) -> &str {
        &self.database.name
    }

    fn db_ssl_mode(&self) -> &str {
        &self.database.ssl_mode
    }

    fn db_timezone(&self) -> &str {
        &self.database.timezone
    }
}
