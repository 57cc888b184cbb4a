//! Wire models for the Hostaway API
//!
//! Only the fields the gateway reads are modelled; everything else in the
//! upstream payloads is ignored.

use serde::{Deserialize, Serialize};

/// Form body for `POST /accessTokens`
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub scope: &'static str,
}

impl<'a> TokenRequest<'a> {
    /// Client-credentials grant with the `general` scope.
    pub fn client_credentials(client_id: &'a str, client_secret: &'a str) -> Self {
        Self {
            grant_type: "client_credentials",
            client_id,
            client_secret,
            scope: "general",
        }
    }
}

/// Response body of `POST /accessTokens`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Response body of `GET /reservations`
///
/// A missing or null `data` reads as no reservations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationsResponse {
    #[serde(default)]
    pub data: Option<Vec<Reservation>>,
}

impl ReservationsResponse {
    pub fn into_reservations(self) -> Vec<Reservation> {
        self.data.unwrap_or_default()
    }
}

/// A booking occupying the nights from `arrival_date` up to, not including,
/// `departure_date`. Dates are kept as received and parsed by the resolver;
/// either may be absent or null upstream.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(default)]
    pub arrival_date: Option<String>,
    #[serde(default)]
    pub departure_date: Option<String>,
}

impl Reservation {
    pub fn new(arrival_date: impl Into<String>, departure_date: impl Into<String>) -> Self {
        Self {
            arrival_date: Some(arrival_date.into()),
            departure_date: Some(departure_date.into()),
        }
    }
}
