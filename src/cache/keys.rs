//! Cache key builders and TTLs
//!
//! # Key Patterns
//!
//! - `hostaway:token` - Upstream bearer token
//! - `availability:{listing_id}` - JSON array of unavailable ISO dates

/// Key holding the cached upstream bearer token
pub const TOKEN_KEY: &str = "hostaway:token";

/// Prefix for cached availability per listing
///
/// Format: `availability:{listing_id}`
pub const AVAILABILITY_PREFIX: &str = "availability";

/// Token TTL (30 days). The token's own expiry is never inspected.
pub const TOKEN_TTL_SECS: u64 = 3600 * 24 * 30;

/// Availability TTL (1 hour)
pub const AVAILABILITY_TTL_SECS: u64 = 3600;

/// Build the cache key for a listing's unavailable dates
///
/// # Example
///
/// ```
/// use availability_gateway::cache::keys::availability_key;
///
/// assert_eq!(availability_key(124502), "availability:124502");
/// ```
pub fn availability_key(listing_id: u64) -> String {
    format!("{}:{}", AVAILABILITY_PREFIX, listing_id)
}
