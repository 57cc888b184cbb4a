//! Recording test double for [`ListingApi`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{GatewayError, Result};
use crate::upstream::{ListingApi, Reservation};

/// Serves canned tokens and reservations and counts every call.
#[derive(Default)]
pub struct FakeListingApi {
    token: Option<String>,
    reservations: Mutex<HashMap<u64, Vec<Reservation>>>,
    fail_reservations: bool,
    token_calls: AtomicUsize,
    reservation_calls: AtomicUsize,
    last_bearer: Mutex<Option<String>>,
}

impl FakeListingApi {
    pub fn new(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            ..Self::default()
        }
    }

    /// Token grant answers 403.
    pub fn failing_token() -> Self {
        Self::default()
    }

    /// Token grant succeeds, reservation listing answers 500.
    pub fn failing_reservations(token: &str) -> Self {
        Self {
            fail_reservations: true,
            ..Self::new(token)
        }
    }

    pub fn with_reservations(self, listing_id: u64, reservations: Vec<Reservation>) -> Self {
        if let Ok(mut map) = self.reservations.lock() {
            map.insert(listing_id, reservations);
        }
        self
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn reservation_calls(&self) -> usize {
        self.reservation_calls.load(Ordering::SeqCst)
    }

    pub fn last_bearer(&self) -> Option<String> {
        self.last_bearer.lock().ok().and_then(|b| b.clone())
    }
}

#[async_trait]
impl ListingApi for FakeListingApi {
    async fn request_access_token(&self) -> Result<String> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        self.token.clone().ok_or_else(|| GatewayError::Upstream {
            status: 403,
            body: r#"{"error":"invalid_client"}"#.to_string(),
        })
    }

    async fn fetch_reservations(&self, token: &str, listing_id: u64) -> Result<Vec<Reservation>> {
        self.reservation_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut bearer) = self.last_bearer.lock() {
            *bearer = Some(token.to_string());
        }
        if self.fail_reservations {
            return Err(GatewayError::Upstream {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(self
            .reservations
            .lock()
            .ok()
            .and_then(|map| map.get(&listing_id).cloned())
            .unwrap_or_default())
    }
}
