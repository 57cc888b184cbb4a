//! Rate Limiting
//!
//! Fixed-window request counting per client IP, applied as axum middleware
//! ahead of every handler.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use tracing::warn;

use super::handlers::AppState;

/// Body sent with 429 responses
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests, please try again later.";

/// Key used when the peer address is unknown
pub const UNKNOWN_CLIENT: &str = "unknown";

// == Window ==
#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    hits: u32,
}

// == Decision ==
/// Outcome of counting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// Request admitted; `remaining` more fit in the current window
    Allowed { remaining: u32, reset_in: Duration },
    /// Window exhausted until `retry_after` elapses
    Limited { retry_after: Duration },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

// == Rate Limiter ==
/// Per-client fixed-window counter.
///
/// Each client's window opens on its first request and admits `max_requests`
/// until `window` has elapsed, after which the count starts over.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    clients: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Counts one request from `client` at the current instant.
    pub async fn check(&self, client: &str) -> RateDecision {
        self.check_at(client, Instant::now()).await
    }

    /// Counts one request from `client` at `now`.
    pub async fn check_at(&self, client: &str, now: Instant) -> RateDecision {
        let mut clients = self.clients.lock().await;

        let window = clients.entry(client.to_string()).or_insert(Window {
            started: now,
            hits: 0,
        });

        if now.duration_since(window.started) >= self.window {
            *window = Window {
                started: now,
                hits: 0,
            };
        }

        let reset_in = self.window.saturating_sub(now.duration_since(window.started));

        if window.hits >= self.max_requests {
            return RateDecision::Limited {
                retry_after: reset_in,
            };
        }

        window.hits += 1;
        RateDecision::Allowed {
            remaining: self.max_requests - window.hits,
            reset_in,
        }
    }

    /// Drops windows that have fully elapsed.
    ///
    /// Returns the number of clients forgotten.
    pub async fn prune_expired(&self) -> usize {
        let now = Instant::now();
        let mut clients = self.clients.lock().await;
        let before = clients.len();
        clients.retain(|_, w| now.duration_since(w.started) < self.window);
        before - clients.len()
    }

    /// Number of clients with an open window.
    pub async fn tracked_clients(&self) -> usize {
        self.clients.lock().await.len()
    }
}

/// Client key for a request: the peer IP, or [`UNKNOWN_CLIENT`].
pub fn client_key(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Middleware rejecting requests over the per-client limit with 429.
///
/// Admitted responses carry `x-ratelimit-limit` and `x-ratelimit-remaining`;
/// rejected ones also carry `retry-after` in seconds.
pub async fn enforce_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_key(&request);
    let limiter = &state.limiter;
    let limit = HeaderValue::from(limiter.max_requests());

    match limiter.check(&client).await {
        RateDecision::Allowed { remaining, .. } => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert("x-ratelimit-limit", limit);
            headers.insert("x-ratelimit-remaining", HeaderValue::from(remaining));
            response
        }
        RateDecision::Limited { retry_after } => {
            warn!("Rate limit exceeded for client {}", client);
            let retry_secs = retry_after.as_secs_f64().ceil() as u64;
            let mut response = (StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE).into_response();
            let headers = response.headers_mut();
            headers.insert("x-ratelimit-limit", limit);
            headers.insert("x-ratelimit-remaining", HeaderValue::from(0u32));
            headers.insert(header::RETRY_AFTER, HeaderValue::from(retry_secs));
            response
        }
    }
}
