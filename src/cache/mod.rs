//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and request coalescing:
//! concurrent misses for the same key trigger a single factory execution.

mod coalescer;
mod entry;
mod keylock;
mod stats;
mod store;


// Re-export public types
pub use coalescer::CoalescingCache;
pub use entry::CacheEntry;
pub use keylock::KeyLockRegistry;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
