//! API Module
//!
//! HTTP handlers, rate limiting, and routing for the gateway.
//!
//! # Endpoints
//! - `GET /availability/:dwelling` - Unavailable dates for a dwelling
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod rate_limit;
pub mod routes;

pub use handlers::*;
pub use rate_limit::{RateDecision, RateLimiter};
pub use routes::create_router;
