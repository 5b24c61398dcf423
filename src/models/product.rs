//! Product domain model
//!
//! The persisted record shape, shared by the durable store, the cache
//! snapshot, and API response bodies.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::CreateProductRequest;

// == Product Record ==
/// A single product record.
///
/// The durable store holds the authoritative copy; the cached copy is a
/// disposable serialized snapshot bounded by the configured TTL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Opaque unique identifier, assigned on creation and immutable
    pub id: String,
    /// Product name (non-empty, bounded length)
    pub name: String,
    /// Product description (non-empty, bounded length)
    pub description: String,
    /// Unit price, strictly positive
    pub price: f64,
    /// Units in stock, never negative
    pub stock_quantity: i64,
}

impl Product {
    /// Creates a new Product from a validated create payload, assigning a
    /// freshly generated identifier.
    pub fn new(payload: CreateProductRequest) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: payload.name,
            description: payload.description,
            price: payload.price,
            stock_quantity: payload.stock_quantity,
        }
    }
}
