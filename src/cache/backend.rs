//! Cache Backend Contract
//!
//! Defines the key-value store interface the cache layer runs over, plus the
//! error type backends report. The error never crosses the cache module
//! boundary: `ProductCache` is the only translation site, downgrading every
//! failure to a miss or a dropped write.

use async_trait::async_trait;
use thiserror::Error;

// == Cache Store Error ==
/// Failure of the underlying cache store.
///
/// Internal to the cache module by design. The record service never sees
/// this type; see `error::ApiError` for the surfaced taxonomy.
#[derive(Debug, Error)]
pub enum CacheStoreError {
    /// The backend was unreachable, timed out, or rejected the call
    #[error("cache store unavailable: {0}")]
    Unavailable(String),

    /// A stored entry could not be decoded into a product snapshot
    #[error("malformed cache entry: {0}")]
    Malformed(#[from] serde_json::Error),
}

// == Cache Backend Trait ==
/// Low-level key-value contract for cache stores.
///
/// Values are serialized product snapshots; the TTL is set at write time and
/// not refreshed by reads. Any call may fail with a transient error, which
/// callers above this trait must absorb.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Retrieves the value stored under `key`, or `None` if absent/expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheStoreError>;

    /// Stores `value` under `key` with the given TTL in seconds.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheStoreError>;

    /// Removes the entry under `key`. Deleting an absent key is a no-op.
    async fn delete(&self, key: &str) -> Result<(), CacheStoreError>;
}
