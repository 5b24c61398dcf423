//! Data models for the product service
//!
//! This module defines the Product domain record and the DTOs (Data
//! Transfer Objects) used for serializing/deserializing HTTP request and
//! response bodies.

pub mod product;
pub mod requests;
pub mod responses;


// Re-export commonly used types
pub use product::Product;
pub use requests::{CreateProductRequest, UpdateProductRequest};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};

// == Public Constants ==
/// Maximum allowed product name length in characters
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum allowed product description length in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;
