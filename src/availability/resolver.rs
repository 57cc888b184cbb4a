//! Availability Resolver
//!
//! Turns a listing id into its unavailable dates, reading through the cache
//! and falling back to an empty result on any failure.

use std::sync::Arc;

use tracing::{error, info};

use crate::availability::dates::{booked_nights, to_iso_strings};
use crate::availability::TokenManager;
use crate::cache::keys::{availability_key, AVAILABILITY_TTL_SECS};
use crate::cache::CacheClient;
use crate::error::Result;
use crate::upstream::ListingApi;

// == Availability Outcome ==
/// Result of resolving one listing.
///
/// `Fallback` keeps "the upstream failed" apart from "nothing is booked",
/// although both serialize to an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityOutcome {
    /// Computed from a fresh upstream fetch and written to the cache
    Fresh(Vec<String>),
    /// Served from the cache as stored
    Cached(Vec<String>),
    /// Resolution failed; nothing was cached
    Fallback,
}

impl AvailabilityOutcome {
    /// Dates to return to the caller.
    pub fn dates(&self) -> &[String] {
        match self {
            Self::Fresh(dates) | Self::Cached(dates) => dates,
            Self::Fallback => &[],
        }
    }

    pub fn into_dates(self) -> Vec<String> {
        match self {
            Self::Fresh(dates) | Self::Cached(dates) => dates,
            Self::Fallback => Vec::new(),
        }
    }

    /// Short label for logs and the `x-availability-source` header.
    pub fn source(&self) -> &'static str {
        match self {
            Self::Fresh(_) => "fresh",
            Self::Cached(_) => "cached",
            Self::Fallback => "fallback",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }
}

// == Availability Resolver ==
/// Read-through cache over the upstream reservations of a listing.
///
/// Concurrent misses for the same listing each hit the upstream; the
/// results are identical so the last write wins harmlessly.
#[derive(Clone)]
pub struct AvailabilityResolver {
    cache: Arc<dyn CacheClient>,
    api: Arc<dyn ListingApi>,
    tokens: TokenManager,
}

impl AvailabilityResolver {
    pub fn new(cache: Arc<dyn CacheClient>, api: Arc<dyn ListingApi>) -> Self {
        let tokens = TokenManager::new(cache.clone(), api.clone());
        Self { cache, api, tokens }
    }

    /// Unavailable dates for `listing_id`. Never fails: errors are logged and
    /// reported as [`AvailabilityOutcome::Fallback`].
    pub async fn unavailable_dates(&self, listing_id: u64) -> AvailabilityOutcome {
        match self.resolve(listing_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    "Error fetching reservations for listing {}: {} ({:?})",
                    listing_id, e, e
                );
                AvailabilityOutcome::Fallback
            }
        }
    }

    async fn resolve(&self, listing_id: u64) -> Result<AvailabilityOutcome> {
        let key = availability_key(listing_id);

        let cached = self.cache.get(&key).await?.filter(|v| !v.is_empty());
        if let Some(cached) = cached {
            info!("Using cached availability for listing {}", listing_id);
            let dates: Vec<String> = serde_json::from_str(&cached)?;
            return Ok(AvailabilityOutcome::Cached(dates));
        }

        info!("Fetching availability for listing {}", listing_id);
        let token = self.tokens.access_token().await?;
        let reservations = self.api.fetch_reservations(&token, listing_id).await?;
        let dates = to_iso_strings(&booked_nights(&reservations));

        self.cache
            .set_with_expiry(&key, &serde_json::to_string(&dates)?, AVAILABILITY_TTL_SECS)
            .await?;
        info!(
            "Availability for listing {} fetched and cached ({} dates)",
            listing_id,
            dates.len()
        );

        Ok(AvailabilityOutcome::Fresh(dates))
    }
}
