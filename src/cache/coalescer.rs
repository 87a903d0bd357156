//! Coalescing Cache Module
//!
//! Orchestrates the double-checked lookup that merges concurrent requests
//! for the same uncached key into a single factory execution.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::{CacheStore, KeyLockRegistry};
use crate::error::{CacheError, Result};

// == Coalescing Cache ==
/// Cache front-end guaranteeing at most one in-flight factory execution per
/// key, process-wide.
///
/// Storage is delegated to an injected [`CacheStore`]; per-key mutual
/// exclusion to an internal [`KeyLockRegistry`]. Cloning is cheap and every
/// clone shares the same store and locks, so a process builds one instance
/// at startup and hands clones to all callers.
#[derive(Debug, Clone)]
pub struct CoalescingCache {
    /// Thread-safe key-value store
    store: Arc<RwLock<CacheStore>>,
    /// Per-key exclusive locks for miss deduplication
    locks: Arc<KeyLockRegistry>,
}

impl CoalescingCache {
    // == Constructor ==
    /// Creates a new coalescing cache over the given store.
    pub fn new(store: Arc<RwLock<CacheStore>>) -> Self {
        Self {
            store,
            locks: Arc::new(KeyLockRegistry::new()),
        }
    }

    // == Accessors ==
    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<RwLock<CacheStore>> {
        &self.store
    }

    /// Returns the per-key lock registry.
    pub fn locks(&self) -> &KeyLockRegistry {
        &self.locks
    }

    // == Get Or Add ==
    /// Returns the cached value for `key`, computing and caching it with
    /// `factory` on a miss.
    ///
    /// Sequence: probe the store without locking; on a miss, acquire this
    /// key's lock, re-probe (another caller may have populated the key while
    /// we waited), and only then run the factory. The factory executes while
    /// the key's lock is held, so concurrent callers for the same key wait
    /// here and then find the value on their re-probe; callers for other
    /// keys are unaffected.
    ///
    /// When callers race with different factories for the same key, the one
    /// that wins the lock determines the cached value: every current waiter
    /// receives the winner's result and its own factory is never invoked.
    ///
    /// A factory failure releases the lock without writing an entry and is
    /// propagated only to the caller that triggered the execution. Waiters
    /// queued behind the failed holder re-run the full sequence and get a
    /// fresh factory attempt; failures are never cached.
    ///
    /// `ttl` of `None` uses the store's default. A TTL of zero produces an
    /// entry that is already expired for subsequent probes; only the caller
    /// that computed the value observes it. That trade-off belongs to the
    /// caller, not the cache.
    pub async fn get_or_add<F, Fut, E>(
        &self,
        key: &str,
        ttl: Option<u64>,
        factory: F,
    ) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<String, E>>,
        E: Display,
    {
        // Fast path: no key lock taken for a cache hit.
        if let Some(value) = self.probe(key).await? {
            return Ok(value);
        }

        let _guard = self.locks.acquire(key).await;

        // Re-probe under the lock: closes the race where another caller
        // populated the key between the first probe and acquisition.
        if let Some(value) = self.probe(key).await? {
            self.store.write().await.record_coalesced();
            return Ok(value);
        }

        self.store.write().await.record_factory_run();
        let value = factory()
            .await
            .map_err(|err| CacheError::FactoryFailed(err.to_string()))?;

        self.store
            .write()
            .await
            .set(key.to_string(), value.clone(), ttl)?;

        Ok(value)
    }

    // == Probe ==
    /// Looks up `key`, treating absence and expiry as a miss.
    ///
    /// Store-level failures (e.g. limit violations) are not misses and
    /// propagate to the caller.
    async fn probe(&self, key: &str) -> Result<Option<String>> {
        let mut store = self.store.write().await;
        match store.get(key) {
            Ok(value) => Ok(Some(value)),
            Err(CacheError::NotFound(_)) | Err(CacheError::Expired(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
