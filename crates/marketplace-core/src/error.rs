//! # Error Types
//!
//! Domain-specific error types for marketplace-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  marketplace-core errors (this file)                                   │
//! │  ├── CoreError        - Cart rule violations                           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  marketplace-store errors (separate crate)                             │
//! │  └── StoreError       - Key/value storage failures                     │
//! │                                                                         │
//! │  apps/cart errors                                                      │
//! │  └── CartError        - What the UI sees (code + message)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CartError → UI                    │
//! │                          StoreError ─┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart rule errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// No line item with this id is in the cart.
    ///
    /// ## When This Occurs
    /// - `increment` / `decrement` for a product that was never added
    /// - A second `decrement` racing the one that removed the item
    #[error("Item not found in cart: {0}")]
    ItemNotFound(String),

    /// Incrementing would overflow the quantity counter.
    #[error("Quantity for {id} cannot be incremented further")]
    QuantityOverflow { id: String },

    /// The same id appears twice in a list that is being adopted.
    #[error("Duplicate item in cart: {0}")]
    DuplicateItem(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparseable price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
