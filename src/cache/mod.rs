//! Cache Layer
//!
//! Best-effort, TTL-bounded mirror of persisted product records, keyed by
//! record identifier. The layer owns the cache-aside protocol
//! (lookup/store/invalidate) and the fail-open handling around it: every
//! backend failure is downgraded to a miss or a dropped write, so the cache
//! is purely additive and correctness rests on the durable store alone.
//!
//! # Structure
//! - `backend` - the `CacheBackend` store contract and its error type
//! - `redis` - Redis-backed implementation with per-call timeouts
//! - `memory` - in-process TTL map, used by tests and cache-less runs
//! - `product_cache` - the cache-aside layer over a backend
//! - `stats` - hit/miss/invalidation counters

pub mod backend;
pub mod memory;
pub mod product_cache;
pub mod redis;
pub mod stats;

// Re-export public types
pub use backend::{CacheBackend, CacheStoreError};
pub use memory::MemoryBackend;
pub use product_cache::ProductCache;
pub use redis::RedisBackend;
pub use stats::CacheStats;
