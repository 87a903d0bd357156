//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{CacheStore, CoalescingCache};
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, FetchRequest, FetchResponse, GetResponse, HealthResponse, SetRequest,
    SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// Holds the process-wide coalescing cache instance; cloning the state
/// clones cheap handles onto the same store and lock registry.
#[derive(Clone)]
pub struct AppState {
    /// The request-coalescing cache front-end
    pub cache: CoalescingCache,
}

impl AppState {
    /// Creates a new AppState over the given cache store.
    pub fn new(store: CacheStore) -> Self {
        Self {
            cache: CoalescingCache::new(Arc::new(RwLock::new(store))),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Initializes the cache store with parameters from the Config.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(CacheStore::new(config.default_ttl))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair in the cache with optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    // Acquire write lock and set the value
    let mut store = state.cache.store().write().await;
    store.set(req.key.clone(), req.value, req.ttl)?;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Acquire write lock (needed for expiry removal and stats update)
    let mut store = state.cache.store().write().await;
    let value = store.get(&key)?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for POST /fetch
///
/// Fetch-through lookup: returns the cached value for the key, or produces
/// it with a simulated slow factory (sleep `delay_ms`, then yield `value`)
/// and caches the result. Concurrent fetches for the same key coalesce into
/// a single simulated computation; the response carries whatever value the
/// winning computation produced.
pub async fn fetch_handler(
    State(state): State<AppState>,
    Json(req): Json<FetchRequest>,
) -> Result<Json<FetchResponse>> {
    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let delay = Duration::from_millis(req.delay_ms.unwrap_or(0));
    let value = req.value;

    let result = state
        .cache
        .get_or_add(&req.key, req.ttl, || async move {
            tokio::time::sleep(delay).await;
            Ok::<_, std::convert::Infallible>(value)
        })
        .await?;

    Ok(Json(FetchResponse::new(req.key, result)))
}

/// Handler for DELETE /del/:key
///
/// Deletes a key from the cache.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    // Acquire write lock
    let mut store = state.cache.store().write().await;
    store.delete(&key)?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    // Acquire read lock for stats
    let store = state.cache.store().read().await;
    let stats = store.stats();

    Json(StatsResponse::new(
        stats.hits,
        stats.misses,
        stats.factory_runs,
        stats.coalesced,
        stats.total_entries,
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
