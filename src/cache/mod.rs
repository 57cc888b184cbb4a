//! Cache Module
//!
//! Key-value cache with get and set-with-expiry semantics, backed by Redis in
//! production and by an in-process TTL map for development and tests.

mod entry;
pub mod keys;
mod memory;
mod redis_cache;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::CacheEntry;
pub use memory::MemoryCache;
pub use redis_cache::RedisCache;

// == Cache Client ==
/// String cache with per-entry expiry.
///
/// Implementations are shared across requests behind an `Arc`, so every
/// method takes `&self`.
#[async_trait]
pub trait CacheClient: Send + Sync {
    /// Returns the stored value, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value, for `ttl_secs` seconds.
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()>;

    /// Backend name for logging.
    fn backend_name(&self) -> &'static str;
}
