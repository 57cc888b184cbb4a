//! Token Manager
//!
//! Hands out the upstream bearer token, acquiring one only when the cache
//! has none.

use std::sync::Arc;

use tracing::{error, info};

use crate::cache::keys::{TOKEN_KEY, TOKEN_TTL_SECS};
use crate::cache::CacheClient;
use crate::error::Result;
use crate::upstream::ListingApi;

/// Cached access to the upstream bearer token.
///
/// A cached token is trusted until its TTL lapses; it is never validated
/// against the upstream.
#[derive(Clone)]
pub struct TokenManager {
    cache: Arc<dyn CacheClient>,
    api: Arc<dyn ListingApi>,
}

impl TokenManager {
    pub fn new(cache: Arc<dyn CacheClient>, api: Arc<dyn ListingApi>) -> Self {
        Self { cache, api }
    }

    /// Returns a bearer token from the cache, or from a fresh grant.
    ///
    /// An empty cached value counts as a miss.
    ///
    /// # Errors
    ///
    /// Upstream and cache failures are logged and returned unchanged.
    pub async fn access_token(&self) -> Result<String> {
        let cached = self.cache.get(TOKEN_KEY).await?.filter(|t| !t.is_empty());
        if let Some(token) = cached {
            info!("Using cached Hostaway token");
            return Ok(token);
        }

        info!("Fetching new Hostaway token");
        let token = self.api.request_access_token().await.map_err(|e| {
            error!("Error getting access token: {}", e);
            e
        })?;

        self.cache
            .set_with_expiry(TOKEN_KEY, &token, TOKEN_TTL_SECS)
            .await?;
        info!("New Hostaway token fetched and cached");

        Ok(token)
    }
}
