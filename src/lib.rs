//! Coalesce Cache - a request-coalescing in-memory cache server
//!
//! Guarantees at most one concurrent factory execution per key: concurrent
//! requests for the same uncached key share a single computation, while
//! requests for different keys proceed fully in parallel. Entries expire by
//! TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CoalescingCache, KeyLockRegistry};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
