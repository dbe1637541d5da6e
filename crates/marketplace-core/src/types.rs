//! # Domain Types
//!
//! Line item types shared by the cart rules, the persisted record and the UI.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   add_to_cart    ┌─────────────────┐              │
//! │  │   NewProduct    │ ───────────────► │    Product      │              │
//! │  │  ─────────────  │  (quantity = 1)  │  ─────────────  │              │
//! │  │  id             │                  │  id             │              │
//! │  │  title          │                  │  title          │              │
//! │  │  image_url      │                  │  image_url      │              │
//! │  │  price (Money)  │                  │  price (Money)  │              │
//! │  └─────────────────┘                  │  quantity (≥ 1) │              │
//! │                                       └─────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A line item in the cart.
///
/// The serialized field names are the persisted record's format:
/// `{"id":"...","title":"...","image_url":"...","price":1099,"quantity":2}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog identifier, unique within a cart.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Image reference shown next to the item.
    pub image_url: String,

    /// Unit price.
    pub price: Money,

    /// Requested quantity, never below 1 while the item is in the cart.
    pub quantity: u32,
}

impl Product {
    /// Creates a line item for a product entering the cart.
    pub fn from_new(item: NewProduct) -> Self {
        Product {
            id: item.id,
            title: item.title,
            image_url: item.image_url,
            price: item.price,
            quantity: 1,
        }
    }
}

// =============================================================================
// NewProduct
// =============================================================================

/// A product descriptor as the catalog screen hands it to `add_to_cart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub price: Money,
}

impl NewProduct {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: Money,
    ) -> Self {
        NewProduct {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }
}

impl From<NewProduct> for Product {
    fn from(item: NewProduct) -> Self {
        Product::from_new(item)
    }
}
