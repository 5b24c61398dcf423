//! Product Cache
//!
//! The cache-aside layer over a `CacheBackend`. Entries are serialized
//! product snapshots keyed by `product:{id}` with a TTL fixed at write time;
//! a hit does not extend the TTL. All three public operations are
//! infallible: this module is the single translation site where a backend
//! failure becomes a miss (lookup), a dropped write (store), or a no-op
//! (invalidate), logged at warn level.

use std::sync::Arc;

use tracing::warn;

use crate::cache::backend::{CacheBackend, CacheStoreError};
use crate::cache::stats::CacheStats;
use crate::models::Product;

/// Builds the cache key for a product identifier.
fn cache_key(id: &str) -> String {
    format!("product:{id}")
}

// == Product Cache ==
/// Best-effort cache of product records.
///
/// Clones share the backend and the stats counters, so one handle can be
/// split across request handlers without an outer lock.
#[derive(Clone)]
pub struct ProductCache {
    backend: Arc<dyn CacheBackend>,
    ttl_seconds: u64,
    stats: Arc<CacheStats>,
}

impl ProductCache {
    // == Constructor ==
    /// Creates a cache over the given backend with a fixed entry TTL.
    pub fn new(backend: Arc<dyn CacheBackend>, ttl_seconds: u64) -> Self {
        Self {
            backend,
            ttl_seconds,
            stats: Arc::new(CacheStats::new()),
        }
    }

    // == Lookup ==
    /// Retrieves the cached product for `id`, or `None` on a miss.
    ///
    /// A missing key, an expired or malformed entry, and any backend failure
    /// all count as a miss; the caller falls back to the durable store.
    pub async fn lookup(&self, id: &str) -> Option<Product> {
        match self.try_lookup(id).await {
            Ok(Some(product)) => {
                self.stats.record_hit();
                Some(product)
            }
            Ok(None) => {
                self.stats.record_miss();
                None
            }
            Err(err) => {
                warn!("Cache lookup for {id} failed; falling back to durable store: {err}");
                self.stats.record_miss();
                None
            }
        }
    }

    async fn try_lookup(&self, id: &str) -> Result<Option<Product>, CacheStoreError> {
        let Some(json) = self.backend.get(&cache_key(id)).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    // == Store ==
    /// Caches a persisted product snapshot under its identifier.
    ///
    /// Population is a side effect of a successful read; on failure the
    /// write is dropped and the caller proceeds as if it succeeded.
    pub async fn store(&self, product: &Product) {
        if let Err(err) = self.try_store(product).await {
            warn!(
                "Cache store for {} failed; continuing without cache: {err}",
                product.id
            );
        }
    }

    async fn try_store(&self, product: &Product) -> Result<(), CacheStoreError> {
        let json = serde_json::to_string(product)?;
        self.backend
            .set(&cache_key(&product.id), &json, self.ttl_seconds)
            .await
    }

    // == Invalidate ==
    /// Removes the cached entry for `id`, if any.
    ///
    /// Idempotent: an absent or already-expired entry is a successful no-op.
    /// On backend failure the entry is left to expire via its TTL, which
    /// bounds the resulting staleness.
    pub async fn invalidate(&self, id: &str) {
        self.stats.record_invalidation();
        if let Err(err) = self.backend.delete(&cache_key(id)).await {
            warn!("Cache invalidation for {id} failed; entry expires via TTL: {err}");
        }
    }

    // == Stats ==
    /// Returns the shared hit/miss/invalidation counters.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryBackend;
    use async_trait::async_trait;

    /// Backend that fails every call, standing in for an unreachable store.
    struct FailingBackend;

    #[async_trait]
    impl CacheBackend for FailingBackend {
        async fn get(&self, _key: &str) -> Result<Option<String>, CacheStoreError> {
            Err(CacheStoreError::Unavailable("connection refused".to_string()))
        }

        async fn set(
            &self,
            _key: &str,
            _value: &str,
            _ttl_seconds: u64,
        ) -> Result<(), CacheStoreError> {
            Err(CacheStoreError::Unavailable("connection refused".to_string()))
        }

        async fn delete(&self, _key: &str) -> Result<(), CacheStoreError> {
            Err(CacheStoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn sample_product() -> Product {
        Product {
            id: "p-1".to_string(),
            name: "Wireless Mouse".to_string(),
            description: "Ergonomic 2.4GHz wireless mouse".to_string(),
            price: 24.99,
            stock_quantity: 120,
        }
    }

    #[tokio::test]
    async fn test_store_then_lookup_round_trip() {
        let cache = ProductCache::new(Arc::new(MemoryBackend::new()), 60);
        let product = sample_product();

        cache.store(&product).await;
        let cached = cache.lookup(&product.id).await;

        assert_eq!(cached, Some(product));
        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.stats().misses(), 0);
    }

    #[tokio::test]
    async fn test_lookup_miss_on_absent_entry() {
        let cache = ProductCache::new(Arc::new(MemoryBackend::new()), 60);

        assert!(cache.lookup("nope").await.is_none());
        assert_eq!(cache.stats().misses(), 1);
    }

    #[tokio::test]
    async fn test_lookup_miss_on_malformed_entry() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set("product:p-1", "not json", 60).await.unwrap();

        let cache = ProductCache::new(backend, 60);
        assert!(cache.lookup("p-1").await.is_none());
        assert_eq!(cache.stats().misses(), 1);
    }

    #[tokio::test]
    async fn test_failing_backend_downgrades_every_call() {
        let cache = ProductCache::new(Arc::new(FailingBackend), 60);
        let product = sample_product();

        // None of these may panic or surface an error.
        cache.store(&product).await;
        assert!(cache.lookup(&product.id).await.is_none());
        cache.invalidate(&product.id).await;

        assert_eq!(cache.stats().misses(), 1);
        assert_eq!(cache.stats().invalidations(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_removes_entry() {
        let cache = ProductCache::new(Arc::new(MemoryBackend::new()), 60);
        let product = sample_product();

        cache.store(&product).await;
        cache.invalidate(&product.id).await;

        assert!(cache.lookup(&product.id).await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_absent_entry_is_noop() {
        let cache = ProductCache::new(Arc::new(MemoryBackend::new()), 60);

        cache.invalidate("never-cached").await;
        assert_eq!(cache.stats().invalidations(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = ProductCache::new(Arc::new(MemoryBackend::new()), 0);
        let product = sample_product();

        cache.store(&product).await;
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        assert!(cache.lookup(&product.id).await.is_none());
    }
}
