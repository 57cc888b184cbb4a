//! In-Memory Cache Module
//!
//! Process-local TTL store implementing [`CacheClient`]. Used when
//! `CACHE_BACKEND=memory` and throughout the test suite.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheClient, CacheEntry};
use crate::error::Result;

// == Memory Cache ==
/// HashMap-backed cache with lazy and periodic TTL expiry.
///
/// Cloning is cheap and clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl MemoryCache {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included until cleanup.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheClient for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => {
                    debug!("Cache MISS: {}", key);
                    return Ok(None);
                }
                Some(entry) if !entry.is_expired() => {
                    debug!("Cache HIT: {}", key);
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {}
            }
        }

        // Expired: drop it unless a writer replaced it in the meantime
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(CacheEntry::is_expired) {
            entries.remove(key);
        }
        debug!("Cache EXPIRED: {}", key);
        Ok(None)
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        debug!("SET {} (TTL: {}s)", key, ttl_secs);
        let entry = CacheEntry::new(value.to_string(), ttl_secs);
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
