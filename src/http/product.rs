//! Product route group and wire types.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::product::ProductService;

/// Request body for the upcoming create endpoint.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub price: f32,
}

/// Response body for product reads once real lookups land.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub price: f32,
    pub created_at: DateTime<Utc>,
}

/// Routes served under the product group prefix.
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/{id}", get(get_product_by_id))
        .with_state(service)
}

async fn get_product_by_id(
    State(_service): State<Arc<ProductService>>,
    Path(id): Path<String>,
) -> Json<Value> {
    tracing::debug!(%id, "product lookup requested");
    Json(json!({ "msg": "get product by id successful." }))
}
