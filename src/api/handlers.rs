//! API Handlers
//!
//! HTTP request handlers for each product service endpoint. Handlers stay
//! thin: validate the payload, call the service, map the result to a
//! response. Every error path goes through `ApiError`'s response mapping.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::cache::ProductCache;
use crate::error::{ApiError, Result};
use crate::models::{
    CreateProductRequest, HealthResponse, Product, StatsResponse, UpdateProductRequest,
};
use crate::service::ProductService;

/// Application state shared across all handlers.
///
/// Holds the record service plus the cache handle the stats endpoint reads.
/// Cloning is cheap; the service and cache share their collaborators.
#[derive(Clone)]
pub struct AppState {
    /// Record service orchestrating store and cache
    pub service: ProductService,
    /// Cache handle, kept for the stats endpoint
    pub cache: ProductCache,
}

impl AppState {
    /// Creates a new AppState over the given service and cache handle.
    pub fn new(service: ProductService, cache: ProductCache) -> Self {
        Self { service, cache }
    }
}

/// Handler for POST /products
///
/// Validates the payload and creates a new product, returning 201 with the
/// persisted record.
pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    if let Some(error_msg) = payload.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let product = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for GET /products/:id
///
/// Retrieves a product by identifier, served from the cache when possible.
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let product = state.service.get(&id).await?;
    Ok(Json(product))
}

/// Handler for PUT /products/:id
///
/// Applies a partial update; fields absent from the payload are left
/// untouched. Rejects payloads that provide no field or violate a field
/// constraint.
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<Product>> {
    if let Some(error_msg) = payload.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let product = state.service.update(&id, payload).await?;
    Ok(Json(product))
}

/// Handler for DELETE /products/:id
///
/// Deletes a product, returning 204 with no body.
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /stats
///
/// Returns the cache hit/miss/invalidation counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats();
    Json(StatsResponse::new(
        stats.hits(),
        stats.misses(),
        stats.invalidations(),
    ))
}

/// Handler for GET /health
///
/// Returns health status of the service.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
