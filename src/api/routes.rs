//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{availability_handler, health_handler, AppState};
use super::rate_limit::enforce_rate_limit;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /availability/:dwelling` - Unavailable dates for a dwelling
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Rate limit: per client IP, applied to every request including unknown routes
/// - CORS: Allows any origin, so booking widgets can call it from the browser
/// - Tracing: Logs all requests
///
/// The rate limiter keys on `ConnectInfo<SocketAddr>`, so serve the router
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/availability/:dwelling", get(availability_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            enforce_rate_limit,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RateLimiter;
    use crate::cache::MemoryCache;
    use crate::upstream::fake::FakeListingApi;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app(max_requests: u32) -> Router {
        let state = AppState::new(
            Arc::new(MemoryCache::new()),
            Arc::new(FakeListingApi::new("tok")),
            RateLimiter::new(max_requests, Duration::from_secs(60)),
        );
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app(100);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-ratelimit-limit"], "100");
        assert_eq!(response.headers()["x-ratelimit-remaining"], "99");
    }

    #[tokio::test]
    async fn test_availability_endpoint() {
        let app = create_test_app(100);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/availability/Cantwell%20Lodge")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-availability-source"], "fresh");
    }

    #[tokio::test]
    async fn test_invalid_dwelling() {
        let app = create_test_app(100);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/availability/Castle")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let app = create_test_app(1);

        let first = app
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(second.headers().contains_key("retry-after"));
    }
}
