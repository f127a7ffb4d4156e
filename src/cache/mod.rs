//! Cache Module
//!
//! In-memory result caching with TTL expiration and LRU eviction, keyed by
//! request fingerprints.

mod entry;
mod fingerprint;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use fingerprint::{fingerprint, FINGERPRINT_LEN};
pub use lru::LruTracker;
pub use stats::{CacheStats, StatsCounters};
pub use store::CacheStore;
