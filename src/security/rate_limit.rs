//! Per-client rate limiting middleware.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Requests allowed per window per limiter key.
pub const MAX_REQUESTS: u32 = 100;

/// Window length.
pub const WINDOW: Duration = Duration::from_secs(60);

/// One client's current window.
struct Window {
    count: u32,
    started: Instant,
}

/// Shared limiter state: a fixed window counter per key.
///
/// Counters must stay correct under concurrent increment/check from many
/// simultaneous requests; a single mutex over the map is enough at this
/// request budget.
pub struct RateLimiterState {
    windows: Mutex<HashMap<String, Window>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiterState {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_requests,
            window,
        }
    }

    /// Record one request for `key`. Returns false when the window budget is
    /// exhausted.
    ///
    /// Lapsed windows are evicted here so the map only tracks clients with
    /// an active window; an evicted key starts over with a fresh budget.
    pub fn check(&self, key: &str) -> bool {
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
        let now = Instant::now();
        windows.retain(|_, window| now.duration_since(window.started) < self.window);

        let window = windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            started: now,
        });

        if window.count < self.max_requests {
            window.count += 1;
            true
        } else {
            false
        }
    }

    /// Number of keys with an active window, as of the last `check`.
    pub fn tracked_keys(&self) -> usize {
        self.windows
            .lock()
            .expect("rate limiter mutex poisoned")
            .len()
    }
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::new(MAX_REQUESTS, WINDOW)
    }
}

/// Middleware enforcing the per-client request budget.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let key = addr.ip().to_string();

    if state.check(&key) {
        next.run(request).await
    } else {
        tracing::warn!(client = %key, "rate limit exceeded");
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "message": "Too many requests, please try again later."
            })),
        )
            .into_response()
    }
}
