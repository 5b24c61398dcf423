//! Product Service
//!
//! Orchestrates the durable store and the cache layer per operation so the
//! store stays the single source of truth and the cache never serves data
//! known to be stale relative to a completed mutation.
//!
//! # Protocol
//! - Reads consult the cache first and populate it from the store on a miss.
//! - Mutations persist first, then invalidate the cache entry; the order is
//!   mandatory so a concurrent reader cannot re-cache the pre-write value
//!   after the invalidation.
//! - Cache health never changes an operation's outcome; the cache layer
//!   absorbs every backend failure before it reaches this service.
//!
//! The service holds no locks. Per-identifier correctness rests on the
//! store's statement atomicity plus the persist-then-invalidate order.

use crate::cache::ProductCache;
use crate::error::{ApiError, Result};
use crate::models::{CreateProductRequest, Product, UpdateProductRequest};
use crate::store::ProductStore;

// == Product Service ==
/// Record service over one durable store and one cache handle.
///
/// Both collaborators are injected at construction; clones share them.
#[derive(Clone)]
pub struct ProductService {
    store: ProductStore,
    cache: ProductCache,
}

impl ProductService {
    // == Constructor ==
    pub fn new(store: ProductStore, cache: ProductCache) -> Self {
        Self { store, cache }
    }

    // == Create ==
    /// Persists a new product under a freshly generated identifier.
    ///
    /// The durable write completes before anything else; on failure the
    /// operation aborts with `NotPersisted` and no cache call is made. The
    /// trailing invalidation guards against stale residue at the new
    /// identifier.
    pub async fn create(&self, payload: CreateProductRequest) -> Result<Product> {
        let product = Product::new(payload);

        self.store
            .insert(&product)
            .await
            .map_err(ApiError::NotPersisted)?;

        self.invalidate_detached(&product.id).await;
        Ok(product)
    }

    // == Read ==
    /// Returns the product for `id`, from the cache when possible.
    ///
    /// On a miss the store is consulted; a present row populates the cache
    /// best-effort before returning. An absent row is `NotFound` and leaves
    /// the cache untouched (no negative caching).
    pub async fn get(&self, id: &str) -> Result<Product> {
        if let Some(product) = self.cache.lookup(id).await {
            return Ok(product);
        }

        let Some(product) = self.store.get_by_id(id).await? else {
            return Err(ApiError::NotFound(format!("Product not found: {id}")));
        };

        self.cache.store(&product).await;
        Ok(product)
    }

    // == Update ==
    /// Merges the provided fields over the existing record and persists the
    /// result, then invalidates the cache entry.
    ///
    /// An empty payload is rejected before any store or cache access. A row
    /// that vanishes between the fetch and the write surfaces as `NotFound`.
    pub async fn update(&self, id: &str, payload: UpdateProductRequest) -> Result<Product> {
        if payload.is_empty() {
            return Err(ApiError::InvalidRequest(
                "At least one field is required".to_string(),
            ));
        }

        let Some(mut product) = self.store.get_by_id(id).await? else {
            return Err(ApiError::NotFound(format!("Product not found: {id}")));
        };

        payload.apply(&mut product);

        let updated = self
            .store
            .update(&product)
            .await
            .map_err(ApiError::NotPersisted)?;
        if !updated {
            return Err(ApiError::NotFound(format!("Product not found: {id}")));
        }

        self.invalidate_detached(id).await;
        Ok(product)
    }

    // == Delete ==
    /// Removes the record for `id` from the store, then invalidates the
    /// cache entry so a lingering snapshot cannot outlive the row.
    pub async fn delete(&self, id: &str) -> Result<()> {
        if self.store.get_by_id(id).await?.is_none() {
            return Err(ApiError::NotFound(format!("Product not found: {id}")));
        }

        let deleted = self
            .store
            .delete(id)
            .await
            .map_err(ApiError::NotPersisted)?;
        if !deleted {
            return Err(ApiError::NotFound(format!("Product not found: {id}")));
        }

        self.invalidate_detached(id).await;
        Ok(())
    }

    // == Detached Invalidation ==
    /// Invalidates the cache entry on a spawned task and waits for it.
    ///
    /// The spawn decouples the invalidation from the caller's request
    /// future: a client disconnect after the durable write commits cannot
    /// cancel the cleanup, while the success path still returns only after
    /// the invalidation has completed.
    async fn invalidate_detached(&self, id: &str) {
        let cache = self.cache.clone();
        let id = id.to_string();
        let _ = tokio::spawn(async move { cache.invalidate(&id).await }).await;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheBackend, CacheStoreError, MemoryBackend};
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Backend that fails every call, standing in for a cache outage.
    struct FailingBackend;

    #[async_trait]
    impl CacheBackend for FailingBackend {
        async fn get(&self, _key: &str) -> std::result::Result<Option<String>, CacheStoreError> {
            Err(CacheStoreError::Unavailable("connection refused".to_string()))
        }

        async fn set(
            &self,
            _key: &str,
            _value: &str,
            _ttl_seconds: u64,
        ) -> std::result::Result<(), CacheStoreError> {
            Err(CacheStoreError::Unavailable("connection refused".to_string()))
        }

        async fn delete(&self, _key: &str) -> std::result::Result<(), CacheStoreError> {
            Err(CacheStoreError::Unavailable("connection refused".to_string()))
        }
    }

    struct TestFixture {
        service: ProductService,
        store: ProductStore,
        cache: ProductCache,
    }

    async fn fixture_with_backend(backend: Arc<dyn CacheBackend>) -> TestFixture {
        let store = ProductStore::connect("sqlite::memory:").await.unwrap();
        let cache = ProductCache::new(backend, 60);
        let service = ProductService::new(store.clone(), cache.clone());
        TestFixture {
            service,
            store,
            cache,
        }
    }

    async fn fixture() -> TestFixture {
        fixture_with_backend(Arc::new(MemoryBackend::new())).await
    }

    fn create_payload() -> CreateProductRequest {
        CreateProductRequest {
            name: "Wireless Mouse".to_string(),
            description: "Ergonomic 2.4GHz wireless mouse".to_string(),
            price: 24.99,
            stock_quantity: 120,
        }
    }

    #[tokio::test]
    async fn test_create_persists_and_returns_record() {
        let fx = fixture().await;

        let product = fx.service.create(create_payload()).await.unwrap();

        assert_eq!(product.name, "Wireless Mouse");
        let stored = fx.store.get_by_id(&product.id).await.unwrap();
        assert_eq!(stored, Some(product));
    }

    #[tokio::test]
    async fn test_read_populates_cache_from_store() {
        let fx = fixture().await;
        let product = fx.service.create(create_payload()).await.unwrap();

        let read = fx.service.get(&product.id).await.unwrap();
        assert_eq!(read, product);

        // The read-through populated the cache with identical content.
        assert_eq!(fx.cache.lookup(&product.id).await, Some(product));
    }

    #[tokio::test]
    async fn test_read_hit_skips_store() {
        let fx = fixture().await;
        let product = fx.service.create(create_payload()).await.unwrap();

        fx.service.get(&product.id).await.unwrap();
        fx.service.get(&product.id).await.unwrap();

        assert_eq!(fx.cache.stats().hits(), 1);
    }

    #[tokio::test]
    async fn test_read_absent_is_not_found() {
        let fx = fixture().await;

        let err = fx.service.get("missing").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_read_absent_does_not_negative_cache() {
        let fx = fixture().await;

        let _ = fx.service.get("missing").await;
        let _ = fx.service.get("missing").await;

        // Both reads fell through to the store; nothing was cached.
        assert_eq!(fx.cache.stats().misses(), 2);
        assert_eq!(fx.cache.stats().hits(), 0);
    }

    #[tokio::test]
    async fn test_update_merges_partial_payload() {
        let fx = fixture().await;
        let product = fx.service.create(create_payload()).await.unwrap();

        let updated = fx
            .service
            .update(
                &product.id,
                UpdateProductRequest {
                    price: Some(12.0),
                    ..UpdateProductRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, 12.0);
        assert_eq!(updated.name, product.name);
        assert_eq!(updated.description, product.description);
        assert_eq!(updated.stock_quantity, product.stock_quantity);
    }

    #[tokio::test]
    async fn test_update_invalidates_cached_entry() {
        let fx = fixture().await;
        let product = fx.service.create(create_payload()).await.unwrap();

        // Populate the cache, then mutate.
        fx.service.get(&product.id).await.unwrap();
        fx.service
            .update(
                &product.id,
                UpdateProductRequest {
                    price: Some(12.0),
                    ..UpdateProductRequest::default()
                },
            )
            .await
            .unwrap();

        // An immediate read must see the new value, not the stale snapshot.
        let read = fx.service.get(&product.id).await.unwrap();
        assert_eq!(read.price, 12.0);
        assert_eq!(fx.cache.lookup(&product.id).await.unwrap().price, 12.0);
    }

    #[tokio::test]
    async fn test_update_empty_payload_rejected_before_any_access() {
        let fx = fixture().await;
        let product = fx.service.create(create_payload()).await.unwrap();
        fx.service.get(&product.id).await.unwrap();
        let invalidations_before = fx.cache.stats().invalidations();

        let err = fx
            .service
            .update(&product.id, UpdateProductRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::InvalidRequest(_)));
        // Store row and cached entry both unchanged.
        let stored = fx.store.get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(stored, product);
        assert_eq!(fx.cache.lookup(&product.id).await, Some(product));
        assert_eq!(fx.cache.stats().invalidations(), invalidations_before);
    }

    #[tokio::test]
    async fn test_update_absent_is_not_found() {
        let fx = fixture().await;

        let err = fx
            .service
            .update(
                "missing",
                UpdateProductRequest {
                    price: Some(1.0),
                    ..UpdateProductRequest::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_is_final_despite_live_cache_entry() {
        let fx = fixture().await;
        let product = fx.service.create(create_payload()).await.unwrap();

        // Cache the record, then delete it; the TTL has not elapsed.
        fx.service.get(&product.id).await.unwrap();
        fx.service.delete(&product.id).await.unwrap();

        let err = fx.service.get(&product.id).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(fx.store.get_by_id(&product.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_absent_is_not_found() {
        let fx = fixture().await;

        let err = fx.service.delete("missing").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_cache_outage_changes_no_outcome() {
        let fx = fixture_with_backend(Arc::new(FailingBackend)).await;

        // Full lifecycle against an always-erroring cache store.
        let product = fx.service.create(create_payload()).await.unwrap();

        let read = fx.service.get(&product.id).await.unwrap();
        assert_eq!(read, product);

        let updated = fx
            .service
            .update(
                &product.id,
                UpdateProductRequest {
                    stock_quantity: Some(99),
                    ..UpdateProductRequest::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.stock_quantity, 99);

        let read = fx.service.get(&product.id).await.unwrap();
        assert_eq!(read.stock_quantity, 99);

        fx.service.delete(&product.id).await.unwrap();
        let err = fx.service.get(&product.id).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_stale_cache_served_until_invalidated() {
        let fx = fixture().await;
        let mut product = fx.service.create(create_payload()).await.unwrap();

        // Cache the record, then mutate the store out-of-band (another
        // writer bypassing this service).
        fx.service.get(&product.id).await.unwrap();
        product.price = 99.0;
        fx.store.update(&product).await.unwrap();

        // The read-through contract serves the cached snapshot until the
        // entry expires or a service mutation invalidates it.
        let read = fx.service.get(&product.id).await.unwrap();
        assert_eq!(read.price, 24.99);
    }
}
