//! Order domain scaffolding.

use sqlx::PgPool;
use std::sync::Arc;

/// Relational-store access for orders. Query methods land here as the domain
/// grows; the handle is wired now so construction order stays fixed.
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Shared connection pool backing this repository.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Order business logic, currently a stub behind the HTTP handler.
pub struct OrderService {
    repo: Arc<OrderRepository>,
}

impl OrderService {
    pub fn new(repo: Arc<OrderRepository>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &OrderRepository {
        &self.repo
    }
}
