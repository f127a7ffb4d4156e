//! Search Cache - result caching for a metasearch command-line client
//!
//! Memoizes search responses behind any [`SearchExecutor`] with a bounded,
//! TTL-limited LRU store keyed by request fingerprints.

pub mod cache;
pub mod config;
pub mod error;
pub mod search;
pub mod tasks;
pub mod telemetry;

pub use cache::{fingerprint, CacheStats, CacheStore};
pub use config::Config;
pub use error::{CacheError, Result};
pub use search::{CachedSearch, OutputFormat, SearchExecutor, SearchRequest, Searcher};
pub use tasks::spawn_cleanup_task;
