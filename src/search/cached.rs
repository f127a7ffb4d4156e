//! Caching decorator around a [`SearchExecutor`].
//!
//! Lookups are keyed by the request fingerprint. Only successful responses
//! are stored; executor errors pass through untouched. Concurrent misses on
//! the same fingerprint are collapsed: the first caller runs the search while
//! the others wait on a per-fingerprint lock and then read its result from the
//! store.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, warn};

use super::{SearchExecutor, SearchRequest};
use crate::cache::{fingerprint, CacheStats, CacheStore};
use crate::error::Result;

type FlightToken = Arc<AsyncMutex<()>>;

/// A [`SearchExecutor`] that memoizes the wrapped executor's responses.
pub struct CachedSearch<E: SearchExecutor> {
    inner: E,
    store: Arc<CacheStore<E::Response>>,
    /// Fingerprint -> lock held by the caller currently running that search
    inflight: Mutex<HashMap<String, FlightToken>>,
}

impl<E: SearchExecutor> CachedSearch<E> {
    /// Wraps `inner` with a fresh store of the given capacity and TTL.
    pub fn new(inner: E, capacity: usize, ttl: Duration) -> Result<Self> {
        Ok(Self::with_store(inner, Arc::new(CacheStore::new(capacity, ttl)?)))
    }

    /// Wraps `inner` around an existing store, e.g. one shared with a cleanup task.
    pub fn with_store(inner: E, store: Arc<CacheStore<E::Response>>) -> Self {
        Self {
            inner,
            store,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &Arc<CacheStore<E::Response>> {
        &self.store
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Drops every cached response.
    pub fn clear_cache(&self) {
        self.store.clear();
        debug!("search cache cleared");
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.store.stats()
    }

    /// Number of fingerprints with a search currently in flight.
    pub fn inflight_count(&self) -> usize {
        self.inflight.lock().len()
    }

    fn flight_token(&self, key: &str) -> FlightToken {
        let mut inflight = self.inflight.lock();
        Arc::clone(
            inflight
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
        )
    }

    fn release_flight(&self, key: &str, token: &FlightToken) {
        let mut inflight = self.inflight.lock();
        // Only the map and this caller still reference the token: nobody is waiting
        if Arc::strong_count(token) == 2 {
            inflight.remove(key);
        }
    }

    async fn search_once(
        &self,
        key: &str,
        request: &SearchRequest,
        token: &FlightToken,
    ) -> std::result::Result<E::Response, E::Error> {
        let _running = token.lock().await;

        // Another caller may have filled the entry while this one waited
        if let Some(response) = self.store.lookup(key) {
            debug!(fingerprint = %key, "served by concurrent search");
            return Ok(response);
        }

        match self.inner.search(request).await {
            Ok(response) => {
                self.store.set(key.to_string(), response.clone());
                Ok(response)
            }
            Err(err) => {
                warn!(fingerprint = %key, error = %err, "search failed, nothing cached");
                Err(err)
            }
        }
    }
}

/// Releases the caller's flight token even if the search future is dropped.
struct Flight<'a, E: SearchExecutor> {
    owner: &'a CachedSearch<E>,
    key: &'a str,
    token: FlightToken,
}

impl<E: SearchExecutor> Drop for Flight<'_, E> {
    fn drop(&mut self) {
        self.owner.release_flight(self.key, &self.token);
    }
}

#[async_trait]
impl<E: SearchExecutor> SearchExecutor for CachedSearch<E> {
    type Response = E::Response;
    type Error = E::Error;

    async fn search(&self, request: &SearchRequest) -> std::result::Result<E::Response, E::Error> {
        let key = fingerprint(request);

        if let Some(response) = self.store.get(&key) {
            debug!(fingerprint = %key, "cache hit");
            return Ok(response);
        }
        debug!(fingerprint = %key, query = %request.query, "cache miss");

        let flight = Flight {
            owner: self,
            key: &key,
            token: self.flight_token(&key),
        };
        self.search_once(&key, request, &flight.token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Executor returning the query echoed back, counting calls.
    #[derive(Default)]
    struct EchoExecutor {
        calls: AtomicUsize,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl SearchExecutor for EchoExecutor {
        type Response = Arc<Vec<String>>;
        type Error = String;

        async fn search(
            &self,
            request: &SearchRequest,
        ) -> std::result::Result<Self::Response, Self::Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            Ok(Arc::new(vec![format!("{} p{}", request.query, request.page)]))
        }
    }

    fn cached(executor: EchoExecutor) -> CachedSearch<EchoExecutor> {
        CachedSearch::new(executor, 10, Duration::from_secs(60)).unwrap()
    }

    #[tokio::test]
    async fn test_hit_skips_executor() {
        let search = cached(EchoExecutor::default());
        let request = SearchRequest::new("ferris");

        let first = search.search(&request).await.unwrap();
        let second = search.search(&request).await.unwrap();

        assert_eq!(search.inner().calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));

        let stats = search.cache_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_distinct_requests_miss() {
        let search = cached(EchoExecutor::default());

        let mut second_page = SearchRequest::new("ferris");
        second_page.page = 2;

        search.search(&SearchRequest::new("ferris")).await.unwrap();
        let response = search.search(&second_page).await.unwrap();

        assert_eq!(response[0], "ferris p2");
        assert_eq!(search.inner().calls.load(Ordering::SeqCst), 2);
        assert_eq!(search.store().len(), 2);
    }

    #[tokio::test]
    async fn test_clear_cache_forces_live_call() {
        let search = cached(EchoExecutor::default());
        let request = SearchRequest::new("ferris");

        search.search(&request).await.unwrap();
        search.clear_cache();
        search.search(&request).await.unwrap();

        assert_eq!(search.inner().calls.load(Ordering::SeqCst), 2);
        assert_eq!(search.cache_stats().size, 1);
    }

    #[tokio::test]
    async fn test_concurrent_misses_share_one_call() {
        let search = Arc::new(cached(EchoExecutor {
            calls: AtomicUsize::new(0),
            delay: Some(Duration::from_millis(50)),
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let search = Arc::clone(&search);
                tokio::spawn(async move { search.search(&SearchRequest::new("popular")).await })
            })
            .collect();

        for handle in handles {
            let response = handle.await.unwrap().unwrap();
            assert_eq!(response[0], "popular p1");
        }

        assert_eq!(search.inner().calls.load(Ordering::SeqCst), 1);
        assert_eq!(search.inflight_count(), 0);
    }

    #[tokio::test]
    async fn test_dropped_search_releases_flight() {
        let search = cached(EchoExecutor {
            calls: AtomicUsize::new(0),
            delay: Some(Duration::from_secs(5)),
        });

        let request = SearchRequest::new("slow");
        let timed_out =
            tokio::time::timeout(Duration::from_millis(20), search.search(&request)).await;

        assert!(timed_out.is_err());
        assert_eq!(search.inflight_count(), 0);
        assert!(search.store().is_empty());
    }
}
