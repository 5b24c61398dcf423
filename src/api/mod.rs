//! API Module
//!
//! HTTP handlers and routing for the product service REST API.
//!
//! # Endpoints
//! - `POST /products` - Create a product
//! - `GET /products/:id` - Retrieve a product by identifier
//! - `PUT /products/:id` - Partially update a product
//! - `DELETE /products/:id` - Delete a product
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
