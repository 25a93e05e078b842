//! Product domain scaffolding.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

/// Row mapping for the `Product` table: name, description, price, stock plus
/// the audit columns.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f32,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Relational-store access for products.
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a product by primary key, skipping soft-deleted rows.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<ProductRecord>, sqlx::Error> {
        sqlx::query_as::<_, ProductRecord>(
            r#"SELECT id, name, description, price, stock, created_at, updated_at, deleted_at
               FROM "Product"
               WHERE id = $1 AND deleted_at IS NULL"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Product business logic, currently a stub behind the HTTP handler.
pub struct ProductService {
    repo: Arc<ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<ProductRepository>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &ProductRepository {
        &self.repo
    }
}
