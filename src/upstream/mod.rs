//! Upstream Module
//!
//! Client for the Hostaway property-management API: client-credentials
//! token acquisition and reservation listing.

#[cfg(test)]
pub(crate) mod fake;
mod hostaway;
pub mod models;

use async_trait::async_trait;

use crate::error::Result;

pub use hostaway::HostawayClient;
pub use models::Reservation;

// == Listing API ==
/// The two upstream calls the gateway depends on.
#[async_trait]
pub trait ListingApi: Send + Sync {
    /// Performs a client-credentials grant and returns the bearer token.
    async fn request_access_token(&self) -> Result<String>;

    /// Lists every reservation of `listing_id`, authenticated with `token`.
    async fn fetch_reservations(&self, token: &str, listing_id: u64) -> Result<Vec<Reservation>>;
}
