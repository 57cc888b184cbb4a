//! Availability Module
//!
//! Token management, reservation date expansion, and the cached resolver
//! that ties them together.

pub mod dates;
mod resolver;
mod token;


pub use resolver::{AvailabilityOutcome, AvailabilityResolver};
pub use token::TokenManager;
