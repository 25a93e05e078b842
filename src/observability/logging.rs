//! Structured logging.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use chrono::{FixedOffset, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Access log timezone: Asia/Bangkok, a fixed UTC+7 offset with no DST.
const BANGKOK_OFFSET_SECS: i32 = 7 * 3600;

/// Initialize the tracing subscriber. Call once, before the configuration
/// loader, so its diagnostics are captured too.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "commerce_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Access-log middleware applied to every request.
///
/// Line format is fixed: `YYYY/MM/DD HH:MM:SS <status> - <METHOD> <path>`.
pub async fn access_log(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let offset = FixedOffset::east_opt(BANGKOK_OFFSET_SECS).expect("UTC+7 is a valid offset");
    let timestamp = Utc::now().with_timezone(&offset).format("%Y/%m/%d %H:%M:%S");
    tracing::info!(
        "{} {} - {} {}",
        timestamp,
        response.status().as_u16(),
        method,
        path
    );

    response
}
