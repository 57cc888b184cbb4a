//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use availability_gateway::api::RateLimiter;
use availability_gateway::cache::{CacheClient, MemoryCache};
use availability_gateway::upstream::{ListingApi, Reservation};
use availability_gateway::{AppState, GatewayError, Result};
use axum::body::Body;
use serde_json::Value;

/// Upstream double that serves canned data and counts calls.
#[derive(Default)]
pub struct RecordingApi {
    pub token: Option<String>,
    pub reservations: HashMap<u64, Vec<Reservation>>,
    pub token_calls: AtomicUsize,
    pub reservation_calls: AtomicUsize,
}

impl RecordingApi {
    pub fn new(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            ..Self::default()
        }
    }

    /// Every token grant is refused.
    pub fn refusing() -> Self {
        Self::default()
    }

    pub fn with(mut self, listing_id: u64, stays: &[(&str, &str)]) -> Self {
        self.reservations.insert(
            listing_id,
            stays
                .iter()
                .map(|(arrival, departure)| Reservation::new(*arrival, *departure))
                .collect(),
        );
        self
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn reservation_calls(&self) -> usize {
        self.reservation_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListingApi for RecordingApi {
    async fn request_access_token(&self) -> Result<String> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        self.token.clone().ok_or(GatewayError::Upstream {
            status: 401,
            body: "invalid_client".to_string(),
        })
    }

    async fn fetch_reservations(&self, _token: &str, listing_id: u64) -> Result<Vec<Reservation>> {
        self.reservation_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .reservations
            .get(&listing_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Cache whose store is unreachable.
pub struct UnreachableCache;

#[async_trait]
impl CacheClient for UnreachableCache {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(GatewayError::Cache("connection refused".to_string()))
    }

    async fn set_with_expiry(&self, _key: &str, _value: &str, _ttl_secs: u64) -> Result<()> {
        Err(GatewayError::Cache("connection refused".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "unreachable"
    }
}

pub fn state(cache: Arc<dyn CacheClient>, api: Arc<RecordingApi>) -> AppState {
    AppState::new(cache, api, RateLimiter::new(100, Duration::from_secs(60)))
}

pub fn memory_state(api: Arc<RecordingApi>) -> (AppState, MemoryCache) {
    let cache = MemoryCache::new();
    (state(Arc::new(cache.clone()), api), cache)
}

pub async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
