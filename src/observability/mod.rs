//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!
//! Per request:
//!     → logging.rs access-log middleware (timestamp, status, method, path)
//! ```
//!
//! # Design Decisions
//! - One subscriber, initialized before anything else runs
//! - Access log lines use a fixed format and a fixed timezone so they are
//!   comparable across deployments
//! - Metrics and distributed tracing are out of scope for the bootstrap

pub mod logging;
