//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Init logging → Load config → Connect database → Wire routes → Start
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight (≤ 15s) → Exit
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then database, listeners last
//! - The drain deadline bounds shutdown; expiry is logged, never re-thrown
//! - Shutdown is a broadcast so tests can stop a server the same way
//!   signals do

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownError};
