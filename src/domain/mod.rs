//! Domain services and repositories.
//!
//! Business logic is deliberately stubbed: the bootstrap wires construction
//! order and ownership (pool → repository → service → handler state) so the
//! real rules can land without touching the server core.

pub mod order;
pub mod product;
