//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub api_port: u16,
    /// Redis server hostname
    pub redis_host: String,
    /// Redis server port
    pub redis_port: u16,
    /// TTL in seconds applied to every cache entry
    pub cache_ttl_seconds: u64,
    /// SQLite connection URL for the durable store
    pub database_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_PORT` - HTTP server port (default: 8080)
    /// - `REDIS_HOST` - Redis hostname (default: "redis")
    /// - `REDIS_PORT` - Redis port (default: 6379)
    /// - `CACHE_TTL_SECONDS` - Cache entry TTL in seconds (default: 3600)
    /// - `DATABASE_URL` - SQLite connection URL (default: "sqlite://products.db")
    pub fn from_env() -> Self {
        Self {
            api_port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            redis_host: env::var("REDIS_HOST").unwrap_or_else(|_| "redis".to_string()),
            redis_port: env::var("REDIS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6379),
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://products.db".to_string()),
        }
    }

    /// Returns the Redis connection URL derived from host and port.
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}", self.redis_host, self.redis_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_port: 8080,
            redis_host: "redis".to_string(),
            redis_port: 6379,
            cache_ttl_seconds: 3600,
            database_url: "sqlite://products.db".to_string(),
        }
    }
}
