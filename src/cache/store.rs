//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.
//!
//! Every operation, `get` included, takes the same exclusive lock: a lookup
//! promotes the key in the recency list, so there is no read-only path.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats, LruTracker, StatsCounters};
use crate::error::{CacheError, Result};

#[derive(Debug)]
struct StoreInner<V> {
    /// Fingerprint -> entry; each entry knows its recency slot
    entries: HashMap<String, CacheEntry<V>>,
    /// Recency order, most recent at the head
    lru: LruTracker,
}

impl<V> StoreInner<V> {
    fn remove(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(entry.slot);
        Some(entry)
    }
}

// == Cache Store ==
/// Bounded in-memory cache with LRU eviction and a uniform TTL.
#[derive(Debug)]
pub struct CacheStore<V> {
    inner: Mutex<StoreInner<V>>,
    /// Performance statistics
    stats: StatsCounters,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Lifetime applied to every entry at insertion
    ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and TTL.
    ///
    /// Both must be non-zero: a zero-capacity or zero-TTL store could never
    /// serve a hit, and turning caching off is the caller's decision, not a
    /// store setting.
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity);
        }
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl);
        }

        Ok(Self {
            inner: Mutex::new(StoreInner {
                entries: HashMap::with_capacity(capacity),
                lru: LruTracker::new(),
            }),
            stats: StatsCounters::new(),
            capacity,
            ttl,
        })
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns a clone of the value if found and not expired, promoting the
    /// key to most recently used. Expired entries are removed and counted as
    /// misses.
    pub fn get(&self, key: &str) -> Option<V> {
        let found = self.lookup(key);
        if found.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        found
    }

    /// Lookup without touching the hit/miss counters.
    ///
    /// Used when a caller has already recorded the outcome of its first lookup
    /// and is re-checking after waiting on another in-flight request.
    pub(crate) fn lookup(&self, key: &str) -> Option<V> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let entry = inner.entries.get(key)?;
        if entry.is_expired() {
            inner.remove(key);
            self.stats.record_expirations(1);
            return None;
        }

        inner.lru.touch(entry.slot);
        Some(entry.value.clone())
    }

    // == Set ==
    /// Stores a value under `key`.
    ///
    /// If the key already exists, the value is replaced, the TTL restarts and
    /// the key becomes most recently used; nothing is evicted. A new key
    /// arriving at capacity first evicts the least recently used entry.
    pub fn set(&self, key: String, value: V) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if let Some(entry) = inner.entries.get_mut(&key) {
            entry.refresh(value, self.ttl);
            inner.lru.touch(entry.slot);
            return;
        }

        if inner.entries.len() >= self.capacity {
            if let Some(evicted) = inner.lru.evict_oldest() {
                inner.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!(key = %evicted, "evicted least recently used entry");
            }
        }

        let slot = inner.lru.push_front(key.clone());
        inner.entries.insert(key, CacheEntry::new(value, self.ttl, slot));
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether anything was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().remove(key).is_some()
    }

    // == Clear ==
    /// Drops every entry. Capacity, TTL and counters are unaffected.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.lru.clear();
    }

    // == Cleanup Expired ==
    /// Removes all expired entries regardless of recency.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&self) -> usize {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let now = current_timestamp_ms();

        let expired: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            inner.remove(key);
        }

        self.stats.record_expirations(expired.len() as u64);
        expired.len()
    }
}

impl<V> CacheStore<V> {
    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len(), self.capacity)
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones that
    /// have not been swept yet. Call [`cleanup`](Self::cleanup) first for an
    /// exact live count.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Consistency Check ==
    /// Verifies that the entry map and the recency list hold exactly the same
    /// keys, each once, and that every entry points at its own slot.
    pub fn check_consistency(&self) -> bool {
        let inner = self.inner.lock();

        if inner.entries.len() != inner.lru.len() || inner.entries.len() > self.capacity {
            return false;
        }

        let mut seen = HashSet::with_capacity(inner.lru.len());
        for (slot, key) in inner.lru.iter() {
            if !seen.insert(key) {
                return false;
            }
            match inner.entries.get(key) {
                Some(entry) if entry.slot == slot => {}
                _ => return false,
            }
        }

        seen.len() == inner.entries.len()
    }
}
