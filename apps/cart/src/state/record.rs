//! # Persisted Cart Record
//!
//! Encoding of the cart list stored under the products key.
//!
//! The record is a JSON array of line items, newest first:
//! ```json
//! [
//!   {"id":"b","title":"Caneca","image_url":"https://…/b.png","price":1500,"quantity":1},
//!   {"id":"a","title":"Camiseta","image_url":"https://…/a.png","price":1099,"quantity":3}
//! ]
//! ```

use marketplace_core::{CartList, Product};

use crate::error::{CartError, CartResult};

/// Serializes the list for storage.
pub fn encode(list: &CartList) -> CartResult<Vec<u8>> {
    serde_json::to_vec(list.items()).map_err(|e| CartError::Internal(e.to_string()))
}

/// Parses a stored record and re-checks the cart invariants.
pub fn decode(bytes: &[u8]) -> CartResult<CartList> {
    let items: Vec<Product> =
        serde_json::from_slice(bytes).map_err(|e| CartError::corrupt(e.to_string()))?;

    CartList::from_items(items).map_err(|e| CartError::corrupt(e.to_string()))
}
