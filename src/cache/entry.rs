//! Cache Entry Module
//!
//! A single stored value with its expiry.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// Represents a single cache entry with value and expiry timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_seconds` from now.
    pub fn new(value: String, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();

        Self {
            value,
            expires_at: now.saturating_add(ttl_seconds.saturating_mul(1000)),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// the expiration time, so a zero TTL is never readable.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Expiry check against an explicit clock reading.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in seconds, 0 once expired.
    pub fn ttl_remaining(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms()) / 1000
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
