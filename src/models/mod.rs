//! Response models for the gateway API
//!
//! DTOs serialized into HTTP response bodies.

pub mod responses;

// Re-export commonly used types
pub use responses::{AvailabilityResponse, ErrorResponse, HealthResponse};
