//! Order route group.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::domain::order::OrderService;

/// Routes served under the order group prefix.
pub fn routes(service: Arc<OrderService>) -> Router {
    Router::new()
        .route("/{id}", get(get_order_by_id))
        .with_state(service)
}

async fn get_order_by_id(
    State(_service): State<Arc<OrderService>>,
    Path(id): Path<String>,
) -> Json<Value> {
    tracing::debug!(%id, "order lookup requested");
    Json(json!({ "msg": "get order by id successful." }))
}
