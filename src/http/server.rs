//! HTTP server setup and lifecycle.
//!
//! # Responsibilities
//! - Create the Axum router and mount route groups under the base API prefix
//! - Wire up middleware (panic recovery, access log, CORS, rate limiting)
//! - Bind the listener on its own task so startup never blocks
//! - Coordinate signal-driven graceful shutdown with a bounded drain
//!
//! # Design Decisions
//! - Middleware order is fixed: access log outermost, then recovery, CORS,
//!   rate limiting; every request gets an access line, including ones whose
//!   handler panicked and was recovered to a 500
//! - `run` takes a bound listener and a shutdown receiver so integration
//!   tests drive the server exactly like the signal path does
//! - Registration logs the logical full path; dispatch stays with the router

use std::any::Any;
use std::mem;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::MethodRouter,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};

use crate::config::ConfigProvider;
use crate::http::paths;
use crate::lifecycle::shutdown::{self, DRAIN_DEADLINE};
use crate::lifecycle::{signals, Shutdown};
use crate::observability::logging;
use crate::security::rate_limit::{rate_limit_middleware, RateLimiterState};

/// Preflight response cache lifetime.
const CORS_MAX_AGE: Duration = Duration::from_secs(300);

/// Handler sets per supported domain, assembled once at wiring time.
///
/// Each entry is an opaque sub-router owning its own state; `None` marks a
/// domain whose handlers were never constructed.
pub struct RouteGroup {
    pub order: Option<Router>,
    pub product: Option<Router>,
}

impl RouteGroup {
    pub fn new(order: Option<Router>, product: Option<Router>) -> Self {
        Self { order, product }
    }
}

/// HTTP server owning the router rooted at the base API prefix.
///
/// Lifecycle: constructed → routes registered → started → (blocks until a
/// termination signal) → shut down.
pub struct HttpServer {
    config: Arc<dyn ConfigProvider + Send + Sync>,
    base_path: String,
    api_router: Router,
    limiter: Arc<RateLimiterState>,
}

impl HttpServer {
    /// Create a new server. The base prefix is normalized to start with `/`
    /// when non-empty; an empty prefix registers routes at the root.
    pub fn new(config: Arc<dyn ConfigProvider + Send + Sync>, base_api_prefix: &str) -> Self {
        let mut base_path = base_api_prefix.to_string();
        if base_path.is_empty() {
            tracing::warn!("base API prefix is empty; routes will be registered at the root");
        } else if !base_path.starts_with('/') {
            base_path = format!("/{base_path}");
            tracing::warn!(
                prefix = %base_path,
                "base API prefix did not start with '/', prepended it"
            );
        }

        tracing::info!(
            app = config.server_name(),
            prefix = %base_path,
            "HTTP server core initialized with middleware"
        );

        Self {
            config,
            base_path,
            api_router: Router::new(),
            limiter: Arc::new(RateLimiterState::default()),
        }
    }

    /// Normalized base API prefix this server mounts under.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Register the per-domain route groups. A missing handler set is an
    /// error, not a failure: the remaining groups still register.
    pub fn setup_routes(&mut self, route_group: RouteGroup) {
        if route_group.order.is_none() || route_group.product.is_none() {
            tracing::error!("failed to set up route: handler set missing");
        }

        if let Some(routes) = route_group.order {
            self.register_group("/orders", routes);
        }
        if let Some(routes) = route_group.product {
            self.register_group("/products", routes);
        }
    }

    /// Mount a sub-router under the base prefix.
    fn register_group(&mut self, sub_prefix: &str, routes: Router) {
        let sub_prefix = normalize_sub_path(sub_prefix);
        let full_prefix = paths::full_path(&self.base_path, &sub_prefix);

        let api = mem::take(&mut self.api_router);
        self.api_router = if sub_prefix.is_empty() {
            api.merge(routes)
        } else {
            api.nest(&sub_prefix, routes)
        };
        tracing::info!(prefix = %full_prefix, "registered API group");
    }

    /// Attach a single route under the base prefix, with the same prefix
    /// normalization as group registration.
    pub fn add_route(&mut self, relative_path: &str, handler: MethodRouter) {
        let relative_path = normalize_sub_path(relative_path);
        let full_path = paths::full_path(&self.base_path, &relative_path);

        let route_path = if relative_path.is_empty() {
            "/".to_string()
        } else {
            relative_path
        };
        let api = mem::take(&mut self.api_router);
        self.api_router = api.route(&route_path, handler);
        tracing::info!(path = %full_path, "adding HTTP route");
    }

    /// Start listening on the configured `host:port` and block until a
    /// termination signal triggers graceful shutdown.
    ///
    /// The listener runs on its own task; bind or serve failures are logged
    /// but the shutdown wait still runs so the process stops cleanly.
    pub async fn start(self) {
        let addr = format!(
            "{}:{}",
            self.config.server_host(),
            self.config.server_port()
        );
        tracing::info!(address = %addr, "attempting to start HTTP server");

        let shutdown = Shutdown::new();
        let shutdown_rx = shutdown.subscribe();
        let bind_addr = addr.clone();
        let server = tokio::spawn(async move {
            let listener = match TcpListener::bind(&bind_addr).await {
                Ok(listener) => listener,
                Err(err) => {
                    tracing::error!(error = %err, address = %bind_addr, "failed to bind HTTP listener");
                    return;
                }
            };
            if let Err(err) = self.run(listener, shutdown_rx).await {
                tracing::error!(error = %err, "HTTP server listener error");
            }
        });
        tracing::info!(address = %addr, "HTTP server listener started");

        let signal = signals::wait_for_termination().await;
        tracing::info!(signal, "received shutdown signal");
        tracing::info!("gracefully shutting down HTTP server");
        shutdown.trigger();

        match shutdown::drain(server, DRAIN_DEADLINE).await {
            Ok(()) => tracing::info!("HTTP server shut down gracefully"),
            Err(err) => tracing::error!(error = %err, "error during server shutdown"),
        }
        tracing::info!("cleanup finished, exiting");
    }

    /// Serve requests on `listener` until the shutdown signal fires, then
    /// drain in-flight requests and return.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server listening");

        let app = self.into_app();
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Compose the final application: route groups under the base prefix,
    /// wrapped by the fixed middleware stack (outermost first: access log,
    /// panic recovery, CORS, rate limit). The access log sits outside
    /// recovery so a panicked request still produces its line, as a 500.
    fn into_app(self) -> Router {
        let api = self.api_router;
        let root = if self.base_path.is_empty() || self.base_path == "/" {
            Router::new().merge(api)
        } else {
            Router::new().nest(&self.base_path, api)
        };

        root.layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(logging::access_log))
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(cors_layer())
                .layer(middleware::from_fn_with_state(
                    self.limiter,
                    rate_limit_middleware,
                )),
        )
    }
}

fn normalize_sub_path(path: &str) -> String {
    if !path.is_empty() && !path.starts_with('/') {
        format!("/{path}")
    } else {
        path.to_string()
    }
}

/// Permissive CORS for every request, with a fixed method and header
/// allow-list and no credentials.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-pingother"),
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .expose_headers([header::LINK])
        .allow_credentials(false)
        .max_age(CORS_MAX_AGE)
}

/// Convert a recovered handler panic into a 500-class JSON response so a
/// failing handler never takes the process down.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "handler panicked; request recovered");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "internal server error" })),
    )
        .into_response()
}
