//! In-Memory Cache Backend
//!
//! A per-process TTL map implementing `CacheBackend`. Used by the test
//! suites and for local runs without a Redis server. Entries carry an
//! expiry instant and are dropped lazily when a read finds them expired;
//! there is no background sweep.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::backend::{CacheBackend, CacheStoreError};

// == Memory Entry ==
/// A single stored value with its expiry instant.
#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

impl MemoryEntry {
    fn new(value: String, ttl_seconds: u64) -> Self {
        Self {
            value,
            expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
        }
    }

    /// An entry is expired once the current time reaches its expiry instant.
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

// == Memory Backend ==
/// In-process cache store. Not shared across processes.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, MemoryEntry>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.values().filter(|e| !e.is_expired()).count()
    }

    /// Returns true if no live entry is stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheStoreError> {
        // Fast path under the read lock; expired entries fall through to a
        // write-locked removal.
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| e.is_expired()) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheStoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), MemoryEntry::new(value.to_string(), ttl_seconds));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheStoreError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_set_and_get() {
        let backend = MemoryBackend::new();

        backend.set("product:1", "{}", 60).await.unwrap();
        let value = backend.get("product:1").await.unwrap();
        assert_eq!(value.as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let backend = MemoryBackend::new();
        assert!(backend.get("product:missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let backend = MemoryBackend::new();

        backend.set("product:1", "{}", 0).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(backend.get("product:1").await.unwrap().is_none());
        // The expired entry was dropped on read.
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_overwrites_and_resets_ttl() {
        let backend = MemoryBackend::new();

        backend.set("product:1", "old", 0).await.unwrap();
        backend.set("product:1", "new", 60).await.unwrap();

        let value = backend.get("product:1").await.unwrap();
        assert_eq!(value.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let backend = MemoryBackend::new();

        backend.set("product:1", "{}", 60).await.unwrap();
        backend.delete("product:1").await.unwrap();
        // Deleting again must still succeed.
        backend.delete("product:1").await.unwrap();

        assert!(backend.get("product:1").await.unwrap().is_none());
    }
}
