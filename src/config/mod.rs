//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional .env file
//!     → loader.rs (dotenvy merge into process environment, once)
//!     → loader.rs (resolve twelve settings, empty value = absent)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the loader caches the first outcome
//!   (value or error) and every later call observes it
//! - All settings have defaults so an empty environment still boots
//! - Consumers see only the read-only capability traits, never setters
//! - No process-global singleton; the loader is a value `main` owns

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use schema::{
    AppConfig, ConfigProvider, DatabaseSettings, DatabaseSettingsProvider, ServerSettings,
    ServerSettingsProvider,
};
