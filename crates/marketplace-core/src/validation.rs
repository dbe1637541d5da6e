//! # Validation Module
//!
//! Checks that keep a cart list well formed.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Mobile UI (TypeScript)                                       │
//! │  └── Catalog data is trusted for display (title, image, price)         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: add_to_cart (Rust)                                           │
//! │  └── THIS MODULE: the id must be usable as the line item key           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Persisted record load                                        │
//! │  └── THIS MODULE: every stored item has an id and quantity ≥ 1         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use marketplace_core::validation::{validate_product_id, validate_quantity};
//!
//! validate_product_id("camiseta-01").unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{NewProduct, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product id. Any non-empty string is a valid key.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    Ok(())
}

/// Validates a stored quantity (must be at least 1).
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a descriptor handed to `add_to_cart`.
///
/// Title, image and price are display data and are taken as given.
pub fn validate_new_product(item: &NewProduct) -> ValidationResult<()> {
    validate_product_id(&item.id)
}

/// Validates a line item read back from the persisted record.
pub fn validate_line_item(item: &Product) -> ValidationResult<()> {
    validate_product_id(&item.id)?;
    validate_quantity(item.quantity)?;
    Ok(())
}
