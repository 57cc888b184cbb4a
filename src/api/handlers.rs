//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{error, info};

use crate::availability::{AvailabilityOutcome, AvailabilityResolver};
use crate::cache::CacheClient;
use crate::config::Config;
use crate::dwellings::DwellingDirectory;
use crate::error::{GatewayError, Result};
use crate::models::{AvailabilityResponse, HealthResponse};
use crate::upstream::ListingApi;

use super::rate_limit::RateLimiter;

/// Header naming where the availability came from
pub const AVAILABILITY_SOURCE_HEADER: &str = "x-availability-source";

/// Application state shared across all handlers.
///
/// Built once at startup; every field is immutable or internally synchronized.
#[derive(Clone)]
pub struct AppState {
    /// Dwelling name → listing id
    pub dwellings: Arc<DwellingDirectory>,
    /// Cached availability lookups
    pub resolver: AvailabilityResolver,
    /// Per-client request counter
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Creates a new AppState over the given cache and upstream.
    pub fn new(
        cache: Arc<dyn CacheClient>,
        api: Arc<dyn ListingApi>,
        limiter: RateLimiter,
    ) -> Self {
        Self {
            dwellings: Arc::new(DwellingDirectory::default()),
            resolver: AvailabilityResolver::new(cache, api),
            limiter: Arc::new(limiter),
        }
    }

    /// Creates a new AppState with the rate limit taken from configuration.
    pub fn from_config(
        config: &Config,
        cache: Arc<dyn CacheClient>,
        api: Arc<dyn ListingApi>,
    ) -> Self {
        let limiter = RateLimiter::new(
            config.rate_limit_max,
            Duration::from_secs(config.rate_limit_window_secs),
        );
        Self::new(cache, api, limiter)
    }

    /// Replaces the dwelling directory.
    pub fn with_dwellings(mut self, dwellings: DwellingDirectory) -> Self {
        self.dwellings = Arc::new(dwellings);
        self
    }
}

/// Handler for GET /availability/:dwelling
///
/// Responds 400 for unknown dwellings. Known dwellings always get 200; any
/// failure while resolving yields an empty list.
pub async fn availability_handler(
    State(state): State<AppState>,
    Path(dwelling): Path<String>,
) -> Result<([(&'static str, &'static str); 1], Json<AvailabilityResponse>)> {
    let Some(listing_id) = state.dwellings.listing_id(&dwelling) else {
        error!("Invalid dwelling: {}", dwelling);
        return Err(GatewayError::InvalidDwelling(dwelling));
    };

    info!(
        "Handling availability request for {} (listing {})",
        dwelling, listing_id
    );

    // A panic while resolving must still answer 200 with an empty list
    let resolver = state.resolver.clone();
    let outcome = tokio::spawn(async move { resolver.unavailable_dates(listing_id).await })
        .await
        .unwrap_or_else(|e| {
            error!("Error in availability endpoint: {}", e);
            AvailabilityOutcome::Fallback
        });

    Ok((
        [(AVAILABILITY_SOURCE_HEADER, outcome.source())],
        Json(AvailabilityResponse::new(outcome.into_dates())),
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
