//! Commerce API service bootstrap.
//!
//! Wires configuration, a Postgres handle, and HTTP route groups into a
//! running server with coordinated startup and bounded graceful shutdown.
//!
//! ```text
//! main
//!   → observability (tracing subscriber)
//!   → config (once-only .env + process-env loader)
//!   → db (pool + startup ping)
//!   → domain (repositories, stub services)
//!   → http (route groups under the base API prefix, middleware stack)
//!   → lifecycle (signal wait, bounded drain)
//! ```

pub mod config;
pub mod db;
pub mod domain;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::{AppConfig, ConfigLoader, ConfigProvider};
pub use http::{HttpServer, RouteGroup};
pub use lifecycle::Shutdown;
