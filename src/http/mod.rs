//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack, base prefix)
//!     → order.rs / product.rs / health.rs (route groups, handlers)
//!     → JSON response to client
//! ```

pub mod health;
pub mod order;
pub mod paths;
pub mod product;
pub mod server;

pub use server::{HttpServer, RouteGroup};
