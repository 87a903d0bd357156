//! Key Lock Registry Module
//!
//! Hands out exclusive, per-key critical sections so that concurrent misses
//! for the same key are serialized while unrelated keys proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

// == Key Lock Registry ==
/// Registry of lazily-created, per-key exclusive locks.
///
/// Each key maps to its own `Arc<Mutex<()>>`. The registry's own mutex is
/// held only for the map lookup or insert, never across a factory execution,
/// so acquiring locks for two different keys never serializes callers beyond
/// that O(1) bookkeeping.
#[derive(Debug, Default)]
pub struct KeyLockRegistry {
    /// Per-key lock objects, created on first acquisition
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLockRegistry {
    // == Constructor ==
    /// Creates a new registry with no locks allocated.
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    // == Acquire ==
    /// Acquires the exclusive lock for `key`, creating it on first use.
    ///
    /// Suspends the caller until no other task holds the lock for this key.
    /// The returned guard releases the lock when dropped, on every exit path:
    /// normal return, factory failure, or cancellation of the caller's
    /// future while queued.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(
                locks
                    .entry(key.to_string())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        // Awaited outside the registry mutex so other keys are not blocked.
        lock.lock_owned().await
    }

    // == Reclaim Idle ==
    /// Removes lock objects that no task currently holds or waits on.
    ///
    /// A lock is idle when the registry map owns the only reference to it:
    /// holders and queued waiters each keep an `Arc` clone alive, and the
    /// clone is taken under the registry mutex, so a strong count of one
    /// proves nobody can be queued on the lock.
    ///
    /// Returns the number of locks reclaimed.
    pub async fn reclaim_idle(&self) -> usize {
        let mut locks = self.locks.lock().await;
        let before = locks.len();
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        before - locks.len()
    }

    // == Length ==
    /// Returns the number of currently tracked lock objects.
    pub async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub async fn is_empty(&self) -> bool {
        self.locks.lock().await.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_acquire_creates_lock_lazily() {
        let registry = KeyLockRegistry::new();
        assert_eq!(registry.len().await, 0);

        let _guard = registry.acquire("key1").await;
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let registry = Arc::new(KeyLockRegistry::new());
        let in_section = Arc::new(AtomicUsize::new(0));

        let mut handles = vec![];
        for _ in 0..5 {
            let registry = Arc::clone(&registry);
            let in_section = Arc::clone(&in_section);
            handles.push(tokio::spawn(async move {
                let _guard = registry.acquire("shared").await;
                let inside = in_section.fetch_add(1, Ordering::SeqCst);
                assert_eq!(inside, 0, "two tasks inside the same key's section");
                tokio::time::sleep(Duration::from_millis(10)).await;
                in_section.fetch_sub(1, Ordering::SeqCst);
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let registry = Arc::new(KeyLockRegistry::new());

        let guard_a = registry.acquire("key_a").await;

        // Acquiring a different key must not wait behind key_a's holder.
        let start = Instant::now();
        let _guard_b = registry.acquire("key_b").await;
        assert!(start.elapsed() < Duration::from_millis(50));

        drop(guard_a);
    }

    #[tokio::test]
    async fn test_guard_drop_releases() {
        let registry = KeyLockRegistry::new();

        {
            let _guard = registry.acquire("key1").await;
        }

        // Re-acquisition succeeds immediately after the guard drops.
        let _guard = registry.acquire("key1").await;
    }

    #[tokio::test]
    async fn test_reclaim_idle_removes_unused_locks() {
        let registry = KeyLockRegistry::new();

        {
            let _g1 = registry.acquire("key1").await;
            let _g2 = registry.acquire("key2").await;
        }
        assert_eq!(registry.len().await, 2);

        let reclaimed = registry.reclaim_idle().await;
        assert_eq!(reclaimed, 2);
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn test_reclaim_idle_keeps_held_locks() {
        let registry = KeyLockRegistry::new();

        let _held = registry.acquire("held").await;
        {
            let _released = registry.acquire("released").await;
        }

        let reclaimed = registry.reclaim_idle().await;
        assert_eq!(reclaimed, 1);
        assert_eq!(registry.len().await, 1);

        // The held key's lock must survive reclamation.
        assert!(!registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_reclaim_idle_keeps_locks_with_waiters() {
        let registry = Arc::new(KeyLockRegistry::new());

        let guard = registry.acquire("contended").await;

        let waiter = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                let _guard = registry.acquire("contended").await;
            })
        };

        // Let the waiter queue up behind the holder.
        tokio::time::sleep(Duration::from_millis(20)).await;

        let reclaimed = registry.reclaim_idle().await;
        assert_eq!(reclaimed, 0, "a lock with a queued waiter was dropped");

        drop(guard);
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_waiter_leaves_lock_usable() {
        let registry = Arc::new(KeyLockRegistry::new());

        let guard = registry.acquire("key1").await;

        let waiter = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                let _guard = registry.acquire("key1").await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Cancel the queued waiter, then release the holder.
        waiter.abort();
        drop(guard);

        // The lock is still acquirable by a fresh caller.
        let _guard = registry.acquire("key1").await;
    }
}
