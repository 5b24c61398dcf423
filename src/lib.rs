//! Product API - A product catalog service with a read-through Redis cache
//!
//! Records live in a durable SQLite store; a TTL-bounded cache mirrors them
//! per identifier. Reads populate the cache, mutations invalidate it after
//! the durable write commits, and any cache failure degrades to a miss.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use service::ProductService;
pub use store::ProductStore;
