//! Search Module
//!
//! The request model, the executor contract, and the caching wrappers built
//! on top of it.

mod cached;
mod executor;
mod request;
mod toggle;

pub use cached::CachedSearch;
pub use executor::SearchExecutor;
pub use request::{OutputFormat, SearchRequest};
pub use toggle::Searcher;
