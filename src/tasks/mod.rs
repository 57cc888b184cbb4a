//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cleanup: Forgets elapsed rate-limit windows and removes expired
//!   in-memory cache entries

mod cleanup;

pub use cleanup::spawn_cleanup_task;
