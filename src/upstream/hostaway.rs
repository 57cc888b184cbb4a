//! Hostaway HTTP client
//!
//! reqwest implementation of [`ListingApi`]. Non-success responses are
//! logged with their body and returned as `GatewayError::Upstream`; nothing
//! is retried.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::config::Config;
use crate::error::{GatewayError, Result};
use crate::upstream::models::{ReservationsResponse, TokenRequest, TokenResponse};
use crate::upstream::{ListingApi, Reservation};

/// Client for the Hostaway REST API
///
/// Not `Debug`: it holds the API key.
#[derive(Clone)]
pub struct HostawayClient {
    client: Client,
    base_url: String,
    account_id: String,
    api_key: String,
}

impl HostawayClient {
    /// Creates a client against `base_url` (e.g. `https://api.hostaway.com/v1`).
    pub fn new(
        base_url: impl Into<String>,
        account_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::with_client(Client::new(), base_url, account_id, api_key)
    }

    /// Creates a client reusing an existing reqwest `Client`.
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        account_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            account_id: account_id.into(),
            api_key: api_key.into(),
        }
    }

    /// Builds the client from configuration.
    ///
    /// Missing credentials are sent as empty strings so the upstream rejects
    /// the grant and availability falls back to empty.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.hostaway_base_url.clone(),
            config.hostaway_account_id.clone().unwrap_or_default(),
            config.hostaway_api_key.clone().unwrap_or_default(),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Reads the body, failing with the status and body text on non-success.
    async fn decode<T: DeserializeOwned>(response: Response, call: &str) -> Result<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!("Hostaway {} failed with {}: {}", call, status, text);
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            error!("Hostaway {} returned an undecodable body: {}", call, e);
            GatewayError::Decode(e)
        })
    }
}

#[async_trait]
impl ListingApi for HostawayClient {
    async fn request_access_token(&self) -> Result<String> {
        debug!("POST {}", self.url("accessTokens"));

        let form = TokenRequest::client_credentials(&self.account_id, &self.api_key);
        let response = self
            .client
            .post(self.url("accessTokens"))
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                error!("Hostaway token request failed: {}", e);
                GatewayError::Http(e)
            })?;

        let token: TokenResponse = Self::decode(response, "token request").await?;
        Ok(token.access_token)
    }

    async fn fetch_reservations(&self, token: &str, listing_id: u64) -> Result<Vec<Reservation>> {
        debug!("GET {} listingId={}", self.url("reservations"), listing_id);

        let response = self
            .client
            .get(self.url("reservations"))
            .query(&[("listingId", listing_id)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                error!("Hostaway reservations request failed: {}", e);
                GatewayError::Http(e)
            })?;

        let body: ReservationsResponse = Self::decode(response, "reservations request").await?;
        Ok(body.into_reservations())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_strips_trailing_slash() {
        let client = HostawayClient::new("https://api.hostaway.com/v1/", "id", "key");
        assert_eq!(
            client.url("accessTokens"),
            "https://api.hostaway.com/v1/accessTokens"
        );
    }

    #[test]
    fn test_from_config_uses_base_url() {
        let config = Config {
            hostaway_base_url: "http://localhost:9999".to_string(),
            ..Config::default()
        };
        let client = HostawayClient::from_config(&config);
        assert_eq!(client.url("reservations"), "http://localhost:9999/reservations");
        assert!(client.account_id.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_http_error() {
        // Port 9 (discard) on loopback is not expected to accept connections.
        let client = HostawayClient::new("http://127.0.0.1:9", "id", "key");
        let result = client.request_access_token().await;
        assert!(matches!(result, Err(GatewayError::Http(_))));
    }
}
