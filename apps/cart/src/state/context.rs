//! # Cart Context
//!
//! Provider/consumer access to the cart without threading it through
//! every call.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Provider Scope                                       │
//! │                                                                         │
//! │  provider.provide(async {                                               │
//! │      ...                                                                │
//! │      let cart = use_cart()?;      ◄── Ok(CartProvider)                  │
//! │      cart.increment("a").await?;                                        │
//! │  })                                                                     │
//! │                                                                         │
//! │  use_cart()                       ◄── Err(CartError::OutsideProvider)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Scope Boundaries
//! The scope is task-local. A task spawned with `tokio::spawn` from inside
//! a scope is outside it; wrap the spawned future in `provide` again.

use std::future::Future;

use crate::error::{CartError, CartResult};
use crate::state::cart::CartProvider;

tokio::task_local! {
    static CURRENT_CART: CartProvider;
}

impl CartProvider {
    /// Runs `fut` with this provider visible to `use_cart()`.
    ///
    /// Scopes nest; the innermost provider wins.
    pub async fn provide<F>(&self, fut: F) -> F::Output
    where
        F: Future,
    {
        CURRENT_CART.scope(self.clone(), fut).await
    }

    /// Synchronous counterpart of [`CartProvider::provide`].
    pub fn provide_sync<R>(&self, f: impl FnOnce() -> R) -> R {
        CURRENT_CART.sync_scope(self.clone(), f)
    }
}

/// Returns the cart of the enclosing provider scope.
///
/// ## Returns
/// - `Ok(CartProvider)` inside `provide` / `provide_sync`
/// - `Err(CartError::OutsideProvider)` anywhere else
pub fn use_cart() -> CartResult<CartProvider> {
    CURRENT_CART
        .try_with(CartProvider::clone)
        .map_err(|_| CartError::OutsideProvider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::cart::CartOptions;
    use marketplace_core::{Money, NewProduct};
    use marketplace_store::MemoryStore;
    use std::sync::Arc;

    async fn provider() -> CartProvider {
        CartProvider::load(Arc::new(MemoryStore::new()), CartOptions::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_use_cart_outside_scope_fails() {
        assert!(matches!(use_cart(), Err(CartError::OutsideProvider)));
    }

    #[tokio::test]
    async fn test_use_cart_inside_scope() {
        let cart = provider().await;

        cart.provide(async {
            let inner = use_cart().unwrap();
            inner
                .add_to_cart(NewProduct::new("a", "T", "u", Money::from_cents(10)))
                .await
                .unwrap();
        })
        .await;

        // Same cart, seen from outside the scope
        assert_eq!(cart.products().len(), 1);
        assert!(use_cart().is_err());
    }

    #[tokio::test]
    async fn test_nested_scope_uses_innermost() {
        let outer = provider().await;
        let inner = CartProvider::load(
            Arc::new(MemoryStore::new()),
            CartOptions {
                storage_key: "@Inner".to_string(),
                ..CartOptions::default()
            },
        )
        .await
        .unwrap();

        outer
            .provide(async {
                assert_eq!(use_cart().unwrap().storage_key(), outer.storage_key());
                inner
                    .provide(async {
                        assert_eq!(use_cart().unwrap().storage_key(), "@Inner");
                    })
                    .await;
            })
            .await;
    }

    #[tokio::test]
    async fn test_spawned_task_is_outside_scope() {
        let cart = provider().await;

        let result = cart
            .provide(async { tokio::spawn(async { use_cart().is_ok() }).await.unwrap() })
            .await;
        assert!(!result);
    }

    #[tokio::test]
    async fn test_provide_sync() {
        let cart = provider().await;
        let key = cart.provide_sync(|| use_cart().map(|c| c.storage_key().to_string()));
        assert_eq!(key.unwrap(), cart.storage_key());
    }
}
