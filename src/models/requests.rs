//! Request DTOs for the product API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::models::{Product, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};

/// Request body for creating a product (POST /products)
///
/// All fields are required; identifiers are assigned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Unit price
    pub price: f64,
    /// Units in stock
    pub stock_quantity: i64,
}

impl CreateProductRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_name(&self.name)
            .or_else(|| validate_description(&self.description))
            .or_else(|| validate_price(self.price))
            .or_else(|| validate_stock(self.stock_quantity))
    }
}

/// Request body for partially updating a product (PUT /products/:id)
///
/// Each field is an explicit provided-or-not marker; absent fields are left
/// untouched by the update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    /// Replacement name, if provided
    pub name: Option<String>,
    /// Replacement description, if provided
    pub description: Option<String>,
    /// Replacement price, if provided
    pub price: Option<f64>,
    /// Replacement stock count, if provided
    pub stock_quantity: Option<i64>,
}

impl UpdateProductRequest {
    /// Returns true if the payload provides no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock_quantity.is_none()
    }

    /// Validates the provided fields, ignoring absent ones.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        self.name
            .as_deref()
            .and_then(validate_name)
            .or_else(|| self.description.as_deref().and_then(validate_description))
            .or_else(|| self.price.and_then(validate_price))
            .or_else(|| self.stock_quantity.and_then(validate_stock))
    }

    /// Applies the provided fields onto an existing product.
    ///
    /// Absent fields keep their pre-update values.
    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock_quantity) = self.stock_quantity {
            product.stock_quantity = stock_quantity;
        }
    }
}

// == Field Validators ==

fn validate_name(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("Name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Some(format!(
            "Name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        ));
    }
    None
}

fn validate_description(description: &str) -> Option<String> {
    if description.is_empty() {
        return Some("Description cannot be empty".to_string());
    }
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Some(format!(
            "Description exceeds maximum length of {} characters",
            MAX_DESCRIPTION_LENGTH
        ));
    }
    None
}

fn validate_price(price: f64) -> Option<String> {
    if !price.is_finite() || price <= 0.0 {
        return Some("Price must be a positive number".to_string());
    }
    None
}

fn validate_stock(stock_quantity: i64) -> Option<String> {
    if stock_quantity < 0 {
        return Some("Stock quantity cannot be negative".to_string());
    }
    None
}
