//! Response DTOs for the gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for `GET /availability/:dwelling`
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    /// Booked ISO dates (`YYYY-MM-DD`)
    pub unavailable: Vec<String>,
}

impl AvailabilityResponse {
    /// Creates a new AvailabilityResponse
    pub fn new(unavailable: Vec<String>) -> Self {
        Self { unavailable }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
