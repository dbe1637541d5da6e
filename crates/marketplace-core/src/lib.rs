//! # marketplace-core: Pure Cart Logic for GoMarketplace
//!
//! This crate holds the cart rules as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     GoMarketplace Cart Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile UI (React Native)                     │   │
//! │  │        Catalog screen ──► Cart screen (+ / - buttons)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ use_cart()                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              apps/cart (CartProvider + commands)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ marketplace-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ CartList  │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             marketplace-store (key/value storage)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Line item types (Product, NewProduct)
//! - [`money`] - Money type with integer cents
//! - [`cart`] - CartList and the add / increment / decrement rules
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use marketplace_core::{CartList, Money, NewProduct};
//!
//! let mut cart = CartList::new();
//! cart.add(NewProduct::new("a", "T", "u", Money::from_cents(1000))).unwrap();
//! cart.increment("a").unwrap();
//!
//! assert_eq!(cart.get("a").unwrap().quantity, 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartChange, CartList};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::{NewProduct, Product};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key of the persisted cart record.
///
/// Namespaced with the app name so it cannot collide with other records
/// in the device's shared key/value storage.
pub const PRODUCTS_STORAGE_KEY: &str = "@GoMarketplace:products";
