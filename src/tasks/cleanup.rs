//! Cleanup Task
//!
//! Background task that periodically drops state that has outlived its window.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::RateLimiter;
use crate::cache::MemoryCache;

/// Spawns a background task that periodically prunes expired state.
///
/// Each run forgets rate-limit windows that have elapsed and, when the
/// gateway runs on the in-memory cache, removes its expired entries. Redis
/// expires keys on its own, so `memory_cache` is `None` in that case.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cleanup_handle = spawn_cleanup_task(limiter.clone(), None, 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    limiter: Arc<RateLimiter>,
    memory_cache: Option<MemoryCache>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let clients = limiter.prune_expired().await;
            let entries = match &memory_cache {
                Some(cache) => cache.cleanup_expired().await,
                None => 0,
            };

            if clients > 0 || entries > 0 {
                info!(
                    "Cleanup: forgot {} rate-limit windows, removed {} expired cache entries",
                    clients, entries
                );
            } else {
                debug!("Cleanup: nothing to remove");
            }
        }
    })
}
