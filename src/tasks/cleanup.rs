//! TTL Cleanup Task
//!
//! Optional background task that periodically sweeps expired search results.
//! Without it, expired entries are reclaimed only when looked up again or
//! evicted to make room.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically cleans up expired cache entries.
///
/// The store lock is held only for the duration of each sweep.
///
/// # Arguments
/// * `cache` - Shared reference to the store
/// * `interval` - Time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// when the host shuts down.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(CacheStore::<String>::new(100, Duration::from_secs(300))?);
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<V>(cache: Arc<CacheStore<V>>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + 'static,
{
    tokio::spawn(async move {
        info!("Starting search cache cleanup task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup();

            if removed > 0 {
                info!("Search cache cleanup: removed {} expired entries", removed);
            } else {
                debug!("Search cache cleanup: no expired entries found");
            }
        }
    })
}
