//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The value to store
/// - `ttl`: Optional TTL in seconds (uses default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: String,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > 256 {
            return Some("Key exceeds maximum length of 256 characters".to_string());
        }
        None
    }
}

/// Request body for the coalescing FETCH operation (POST /fetch)
///
/// Models an expensive upstream lookup: the server produces `value` after
/// `delay_ms` of simulated work, caching the result under `key`. Concurrent
/// fetches for the same key share a single simulated computation.
///
/// # Fields
/// - `key`: The cache key to fetch or populate
/// - `value`: The value the simulated factory produces on a miss
/// - `ttl`: Optional TTL in seconds (uses default if not specified)
/// - `delay_ms`: Optional simulated computation delay in milliseconds
#[derive(Debug, Clone, Deserialize)]
pub struct FetchRequest {
    /// The cache key
    pub key: String,
    /// The value produced by the simulated factory
    pub value: String,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
    /// Optional simulated factory delay in milliseconds
    #[serde(default)]
    pub delay_ms: Option<u64>,
}

impl FetchRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > 256 {
            return Some("Key exceeds maximum length of 256 characters".to_string());
        }
        None
    }
}
