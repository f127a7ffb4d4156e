//! On/off switch between a bare executor and its cached form.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{CachedSearch, SearchExecutor, SearchRequest};
use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::Result;

/// The executor the CLI layer talks to, cached or not depending on config.
pub enum Searcher<E: SearchExecutor> {
    Direct(E),
    Cached(CachedSearch<E>),
}

impl<E: SearchExecutor> Searcher<E> {
    /// Builds the searcher described by `config`, validating cache settings
    /// only when caching is enabled.
    pub fn from_config(inner: E, config: &Config) -> Result<Self> {
        if !config.cache_enabled {
            info!("search cache disabled");
            return Ok(Searcher::Direct(inner));
        }

        config.validate()?;
        info!(
            "search cache enabled: size={}, ttl={}s",
            config.cache_size, config.cache_ttl
        );
        Ok(Searcher::Cached(CachedSearch::new(
            inner,
            config.cache_size,
            config.ttl(),
        )?))
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, Searcher::Cached(_))
    }

    /// Clears the cache if there is one. Returns whether anything was cleared.
    pub fn clear_cache(&self) -> bool {
        match self {
            Searcher::Direct(_) => false,
            Searcher::Cached(cached) => {
                cached.clear_cache();
                true
            }
        }
    }

    /// Statistics of the cache, `None` when caching is off.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        match self {
            Searcher::Direct(_) => None,
            Searcher::Cached(cached) => Some(cached.cache_stats()),
        }
    }

    /// The underlying store, for wiring up a cleanup task.
    pub fn store(&self) -> Option<&Arc<CacheStore<E::Response>>> {
        match self {
            Searcher::Direct(_) => None,
            Searcher::Cached(cached) => Some(cached.store()),
        }
    }
}

#[async_trait]
impl<E: SearchExecutor> SearchExecutor for Searcher<E> {
    type Response = E::Response;
    type Error = E::Error;

    async fn search(&self, request: &SearchRequest) -> std::result::Result<E::Response, E::Error> {
        match self {
            Searcher::Direct(inner) => inner.search(request).await,
            Searcher::Cached(cached) => cached.search(request).await,
        }
    }
}
