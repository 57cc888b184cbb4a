//! Availability Gateway - dwelling availability over the Hostaway API
//!
//! Resolves dwelling names to listings, reads reservations through a Redis
//! cache, and serves the booked nights as JSON behind a per-client rate limit.

pub mod api;
pub mod availability;
pub mod cache;
pub mod config;
pub mod dwellings;
pub mod error;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{GatewayError, Result};
pub use tasks::spawn_cleanup_task;
