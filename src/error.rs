//! Error types for the availability gateway
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Gateway Error Enum ==
/// Unified error type for the gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Cache store unreachable or command failed
    #[error("Cache error: {0}")]
    Cache(String),

    /// Upstream answered with a non-success status
    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Transport failure talking to the upstream
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Payload could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reservation carried a date that is not `YYYY-MM-DD`
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Dwelling name not present in the listing table
    #[error("Invalid dwelling")]
    InvalidDwelling(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::InvalidDwelling(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the gateway.
pub type Result<T> = std::result::Result<T, GatewayError>;
