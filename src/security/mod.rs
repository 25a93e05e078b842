//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → rate_limit.rs (check per-client fixed window)
//!     → Pass to routing
//! ```
//!
//! # Design Decisions
//! - Fail closed: an exhausted window rejects with 429 before routing
//! - Limiter state is the only mutable shared state in the server

pub mod rate_limit;

pub use rate_limit::RateLimiterState;
