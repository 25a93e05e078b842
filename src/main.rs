use std::path::Path;
use std::sync::Arc;

use axum::routing::get;

use commerce_api::config::{ConfigLoader, ServerSettingsProvider};
use commerce_api::db;
use commerce_api::domain::order::{OrderRepository, OrderService};
use commerce_api::domain::product::{ProductRepository, ProductService};
use commerce_api::http::{health, order, product, HttpServer, RouteGroup};
use commerce_api::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let loader = ConfigLoader::new();
    let config = match loader.load(Some(Path::new(".env"))) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "failed to load configuration");
            return Err(err.into());
        }
    };
    tracing::info!(
        env = config.server_env(),
        name = config.server_name(),
        "starting commerce-api"
    );

    let pool = match db::connect(config.as_ref()).await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!(error = %err, "failed to connect to database");
            return Err(err.into());
        }
    };

    let order_service = Arc::new(OrderService::new(Arc::new(OrderRepository::new(
        pool.clone(),
    ))));
    let product_service = Arc::new(ProductService::new(Arc::new(ProductRepository::new(pool))));

    let route_group = RouteGroup::new(
        Some(order::routes(order_service)),
        Some(product::routes(product_service)),
    );

    let base_api_prefix = config.base_api_prefix().to_string();
    let mut server = HttpServer::new(config, &base_api_prefix);
    server.setup_routes(route_group);
    server.add_route("/health", get(health::health));
    server.start().await;

    Ok(())
}
