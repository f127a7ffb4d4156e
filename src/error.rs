//! Error types for the search cache
//!
//! The cache never fails on the search path; these errors cover construction
//! and configuration only.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while building a cache from resolved settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity must hold at least one entry
    #[error("Invalid capacity: cache must hold at least one entry")]
    InvalidCapacity,

    /// TTL must be longer than zero
    #[error("Invalid TTL: entries must live longer than zero")]
    InvalidTtl,

    /// A configuration value could not be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache construction.
pub type Result<T> = std::result::Result<T, CacheError>;
