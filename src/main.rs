//! Product API - A product catalog service with a read-through Redis cache
//!
//! Records live in a durable SQLite store; a TTL-bounded Redis cache mirrors
//! them per identifier. Reads populate the cache, mutations invalidate it
//! after the durable write commits, and any cache failure degrades to a miss.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_api::api::{create_router, AppState};
use product_api::cache::{ProductCache, RedisBackend};
use product_api::config::Config;
use product_api::service::ProductService;
use product_api::store::ProductStore;

/// Main entry point for the product API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the durable store, create schema, seed sample data
/// 4. Wire the Redis cache backend and cache layer
/// 5. Construct the record service and Axum router
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Product API Server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, redis={}, cache_ttl={}s, database={}",
        config.api_port,
        config.redis_url(),
        config.cache_ttl_seconds,
        config.database_url
    );

    // Connect the durable store and seed an empty database
    let store = ProductStore::connect(&config.database_url)
        .await
        .context("failed to connect durable store")?;
    store
        .seed_sample_products()
        .await
        .context("failed to seed sample products")?;
    info!("Durable store ready");

    // Wire the cache layer; an unreachable Redis degrades to misses at
    // request time rather than failing startup
    let backend = RedisBackend::new(&config.redis_url())
        .context("failed to create redis cache backend")?;
    let cache = ProductCache::new(Arc::new(backend), config.cache_ttl_seconds);
    info!("Cache layer initialized");

    // Construct the record service and application state
    let service = ProductService::new(store, cache.clone());
    let state = AppState::new(service, cache);

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
