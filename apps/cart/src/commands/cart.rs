//! # Cart Commands
//!
//! Cart operations exposed to the UI.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart   ┌──────────┐   decrement (qty 1)          │
//! │  │  Empty   │──────────────►│ In Cart  │───────────────────┐           │
//! │  │  Cart    │               │          │◄──┐               │           │
//! │  └──────────┘               └──────────┘   │ increment     │           │
//! │       ▲                          │         │ add_to_cart   │           │
//! │       │                          └─────────┘ decrement     │           │
//! │       └────────────────── last item removed ◄──────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use marketplace_core::{NewProduct, Product};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CartResult;
use crate::state::use_cart;

/// Cart response: items plus the counts the cart badge needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<Product>,
    pub item_count: usize,
    pub total_quantity: u64,
}

impl From<Vec<Product>> for CartResponse {
    fn from(items: Vec<Product>) -> Self {
        let total_quantity = items.iter().map(|p| u64::from(p.quantity)).sum();
        CartResponse {
            item_count: items.len(),
            total_quantity,
            items,
        }
    }
}

/// Gets the current cart contents.
pub async fn get_cart() -> CartResult<CartResponse> {
    debug!("get_cart command");
    let cart = use_cart()?;
    Ok(CartResponse::from(cart.products()))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Not in cart: added at the top with quantity 1
/// - Already in cart: quantity increases; the descriptor's other fields
///   are ignored
pub async fn add_to_cart(item: NewProduct) -> CartResult<CartResponse> {
    debug!(id = %item.id, "add_to_cart command");
    let cart = use_cart()?;
    cart.add_to_cart(item).await?;
    Ok(CartResponse::from(cart.products()))
}

/// Increments an item's quantity ("+" button).
pub async fn increment(id: &str) -> CartResult<CartResponse> {
    debug!(id = %id, "increment command");
    let cart = use_cart()?;
    cart.increment(id).await?;
    Ok(CartResponse::from(cart.products()))
}

/// Decrements an item's quantity ("-" button); at quantity 1 the item
/// is removed.
pub async fn decrement(id: &str) -> CartResult<CartResponse> {
    debug!(id = %id, "decrement command");
    let cart = use_cart()?;
    cart.decrement(id).await?;
    Ok(CartResponse::from(cart.products()))
}
