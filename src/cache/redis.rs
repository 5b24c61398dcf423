//! Redis Cache Backend
//!
//! Implements `CacheBackend` over a Redis server using a multiplexed async
//! connection. Every call, including connection establishment, is bounded by
//! a short timeout so a stalled Redis cannot stall request completion; a
//! timed-out call surfaces as `CacheStoreError::Unavailable` and the layer
//! above degrades it to a miss.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, Client};
use tokio::time::timeout;

use crate::cache::backend::{CacheBackend, CacheStoreError};

/// Per-call timeout for Redis operations, connection included.
const CALL_TIMEOUT: Duration = Duration::from_secs(1);

// == Redis Backend ==
/// Redis-backed cache store.
///
/// Holds a `redis::Client` and obtains a multiplexed connection per call;
/// the client itself performs no I/O until a command runs, so construction
/// succeeds even when Redis is down.
pub struct RedisBackend {
    client: Client,
}

impl RedisBackend {
    /// Creates a backend for the given Redis URL (e.g. "redis://redis:6379").
    ///
    /// Fails only on an unparseable URL, never on an unreachable server.
    pub fn new(url: &str) -> Result<Self, CacheStoreError> {
        let client = Client::open(url)
            .map_err(|e| CacheStoreError::Unavailable(format!("invalid redis url: {e}")))?;
        Ok(Self { client })
    }

    /// Obtains a multiplexed connection, bounded by the call timeout.
    async fn connection(&self) -> Result<MultiplexedConnection, CacheStoreError> {
        match timeout(CALL_TIMEOUT, self.client.get_multiplexed_async_connection()).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => Err(CacheStoreError::Unavailable(format!(
                "connection failed: {e}"
            ))),
            Err(_) => Err(CacheStoreError::Unavailable(
                "connection timed out".to_string(),
            )),
        }
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheStoreError> {
        let mut conn = self.connection().await?;
        match timeout(
            CALL_TIMEOUT,
            redis::cmd("GET")
                .arg(key)
                .query_async::<Option<String>>(&mut conn),
        )
        .await
        {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(CacheStoreError::Unavailable(format!("GET failed: {e}"))),
            Err(_) => Err(CacheStoreError::Unavailable("GET timed out".to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheStoreError> {
        let mut conn = self.connection().await?;
        match timeout(
            CALL_TIMEOUT,
            redis::cmd("SETEX")
                .arg(key)
                .arg(ttl_seconds)
                .arg(value)
                .query_async::<()>(&mut conn),
        )
        .await
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(CacheStoreError::Unavailable(format!("SETEX failed: {e}"))),
            Err(_) => Err(CacheStoreError::Unavailable("SETEX timed out".to_string())),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), CacheStoreError> {
        let mut conn = self.connection().await?;
        match timeout(
            CALL_TIMEOUT,
            redis::cmd("DEL").arg(key).query_async::<()>(&mut conn),
        )
        .await
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(CacheStoreError::Unavailable(format!("DEL failed: {e}"))),
            Err(_) => Err(CacheStoreError::Unavailable("DEL timed out".to_string())),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_url() {
        assert!(RedisBackend::new("not a url").is_err());
    }

    #[test]
    fn test_new_accepts_url_without_connecting() {
        // No Redis is running here; construction must still succeed.
        assert!(RedisBackend::new("redis://localhost:1").is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_unavailable() {
        let backend = RedisBackend::new("redis://localhost:1").unwrap();

        let err = backend.get("product:missing").await.unwrap_err();
        assert!(matches!(err, CacheStoreError::Unavailable(_)));
    }
}
