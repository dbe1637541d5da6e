//! # Cart Rules
//!
//! The pure list logic behind `add_to_cart`, `increment` and `decrement`.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart List Operations                                 │
//! │                                                                         │
//! │  add(item) ─────┬── id absent ──► insert at FRONT with quantity 1      │
//! │                 └── id present ─► increment(id), descriptor discarded  │
//! │                                                                         │
//! │  increment(id) ─┬── present ────► quantity + 1                         │
//! │                 └── absent ─────► ItemNotFound                         │
//! │                                                                         │
//! │  decrement(id) ─┬── quantity > 1 ► quantity - 1                        │
//! │                 ├── quantity = 1 ► item removed                        │
//! │                 └── absent ──────► ItemNotFound                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by `id`
//! - Every quantity is ≥ 1
//! - Order is insertion order, newest first

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{CoreError, CoreResult};
use crate::types::{NewProduct, Product};
use crate::validation::{validate_line_item, validate_new_product};

/// What a mutation did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line item was inserted at the front.
    Added,
    /// An existing line item now has this quantity.
    Incremented { quantity: u32 },
    /// An existing line item now has this quantity.
    Decremented { quantity: u32 },
    /// The line item left the cart.
    Removed,
}

/// The ordered list of line items in a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartList {
    items: Vec<Product>,
}

impl CartList {
    /// Creates an empty list.
    pub fn new() -> Self {
        CartList { items: Vec::new() }
    }

    /// Adopts a list read from storage, checking the invariants.
    ///
    /// ## Returns
    /// - `Err(CoreError::DuplicateItem)` if an id occurs twice
    /// - `Err(CoreError::Validation)` for an empty id or a zero quantity
    pub fn from_items(items: Vec<Product>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            validate_line_item(item)?;
            if !seen.insert(item.id.as_str()) {
                return Err(CoreError::DuplicateItem(item.id.clone()));
            }
        }
        Ok(CartList { items })
    }

    /// Returns the items in display order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Consumes the list, returning its items.
    pub fn into_items(self) -> Vec<Product> {
        self.items
    }

    /// Index of the first item with this id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|p| p.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.items.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities (the badge count on the cart icon).
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|p| u64::from(p.quantity)).sum()
    }

    /// Adds a product, or bumps its quantity if it is already present.
    ///
    /// When the id is already in the cart the incoming title, image and
    /// price are ignored; only the quantity changes.
    pub fn add(&mut self, item: NewProduct) -> CoreResult<CartChange> {
        if self.contains(&item.id) {
            let quantity = self.increment(&item.id)?;
            return Ok(CartChange::Incremented { quantity });
        }

        validate_new_product(&item)?;
        self.items.insert(0, Product::from_new(item));
        Ok(CartChange::Added)
    }

    /// Increments the quantity of an item and returns the new quantity.
    pub fn increment(&mut self, id: &str) -> CoreResult<u32> {
        let item = self
            .items
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;

        item.quantity = item
            .quantity
            .checked_add(1)
            .ok_or_else(|| CoreError::QuantityOverflow { id: id.to_string() })?;

        Ok(item.quantity)
    }

    /// Decrements the quantity of an item, removing it when it reaches zero.
    pub fn decrement(&mut self, id: &str) -> CoreResult<CartChange> {
        let index = self
            .position(id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;

        let item = &mut self.items[index];
        if item.quantity > 1 {
            item.quantity -= 1;
            return Ok(CartChange::Decremented {
                quantity: item.quantity,
            });
        }

        self.items.remove(index);
        Ok(CartChange::Removed)
    }
}

impl From<CartList> for Vec<Product> {
    fn from(list: CartList) -> Self {
        list.items
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
