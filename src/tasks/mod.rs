//! Background Tasks Module
//!
//! Maintenance tasks a host process may choose to run alongside the cache.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired cache entries at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
