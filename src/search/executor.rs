//! The search-executing collaborator the cache wraps.

use std::fmt::Display;

use async_trait::async_trait;

use super::SearchRequest;

/// Anything that can run a search: an HTTP client, a fixture, or another
/// wrapper.
///
/// Responses must be cheap enough to clone: a cached response is cloned out
/// of the store on every hit.
#[async_trait]
pub trait SearchExecutor: Send + Sync {
    /// Result of a successful search
    type Response: Clone + Send + Sync + 'static;
    /// Failure reported by the executor, surfaced unchanged by wrappers
    type Error: Display + Send + 'static;

    async fn search(&self, request: &SearchRequest) -> Result<Self::Response, Self::Error>;
}
