//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries and
//! reclaims idle per-key locks.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CoalescingCache;

/// Spawns a background task that periodically cleans up expired cache
/// entries and reclaims key locks nobody holds or waits on.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between runs. Each run takes the store's write lock for the expiry sweep
/// and the registry's lock for reclamation; neither is held across the
/// sleep.
///
/// # Arguments
/// * `cache` - Shared handle to the coalescing cache
/// * `cleanup_interval_secs` - Interval in seconds between cleanup runs
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = CoalescingCache::new(Arc::new(RwLock::new(CacheStore::new(300))));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 1);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: CoalescingCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            // Acquire write lock and cleanup expired entries
            let removed = {
                let mut store = cache.store().write().await;
                store.cleanup_expired()
            };

            // Drop key locks that have neither a holder nor a queued waiter
            let reclaimed = cache.locks().reclaim_idle().await;

            // Log cleanup statistics
            if removed > 0 || reclaimed > 0 {
                info!(
                    "TTL cleanup: removed {} expired entries, reclaimed {} idle locks",
                    removed, reclaimed
                );
            } else {
                debug!("TTL cleanup: nothing to remove");
            }
        }
    })
}
