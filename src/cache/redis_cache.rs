//! Redis Cache Module
//!
//! Production [`CacheClient`] backed by a Redis `ConnectionManager`, which
//! multiplexes one connection across all requests and reconnects on failure.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use tracing::{debug, error, warn};

use crate::cache::CacheClient;
use crate::error::{GatewayError, Result};

/// Redis cache implementation with a shared connection manager.
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis and verifies the server answers `PING`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Cache` if the URL is invalid or the server is unreachable.
    pub async fn connect(url: &str) -> Result<Self> {
        debug!("Connecting to Redis");

        let client = Client::open(url).map_err(|e| {
            error!("Failed to create Redis client: {}", e);
            GatewayError::Cache(format!("Invalid Redis URL: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            error!("Failed to establish Redis connection: {}", e);
            GatewayError::Cache(format!("Connection failed: {}", e))
        })?;

        let cache = Self { manager };
        cache.ping().await?;

        debug!("Redis connection established successfully");
        Ok(cache)
    }

    /// Pings the Redis server to check connectivity.
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_redis_error)?;
        Ok(())
    }

    fn map_redis_error(err: RedisError) -> GatewayError {
        match err.kind() {
            redis::ErrorKind::IoError => {
                error!("Redis I/O error: {}", err);
                GatewayError::Cache(format!("I/O error: {}", err))
            }
            redis::ErrorKind::TypeError => {
                warn!("Redis type error: {}", err);
                GatewayError::Cache(format!("Type mismatch: {}", err))
            }
            _ => {
                error!("Redis error: {}", err);
                GatewayError::Cache(err.to_string())
            }
        }
    }
}

#[async_trait]
impl CacheClient for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        debug!("GET {}", key);
        let mut conn = self.manager.clone();

        let value: Option<String> = conn.get(key).await.map_err(Self::map_redis_error)?;
        if value.is_some() {
            debug!("Cache HIT: {}", key);
        } else {
            debug!("Cache MISS: {}", key);
        }
        Ok(value)
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        debug!("SETEX {} (TTL: {}s)", key, ttl_secs);
        let mut conn = self.manager.clone();

        let _: () = conn
            .set_ex(key, value, ttl_secs)
            .await
            .map_err(Self::map_redis_error)?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let result = RedisCache::connect("not a url").await;
        assert!(matches!(result, Err(GatewayError::Cache(_))));
    }
}
