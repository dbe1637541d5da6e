//! # Cart State
//!
//! The cart state container: the authoritative in-memory list plus its
//! persisted mirror.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  UI Action           Provider Method        Persisted + In-Memory       │
//! │  ─────────           ───────────────        ─────────────────────       │
//! │                                                                         │
//! │  Tap "add" ────────► add_to_cart(item) ──┐                              │
//! │  Tap "+" ──────────► increment(id) ──────┼─► lock list                  │
//! │  Tap "-" ──────────► decrement(id) ──────┘   apply rule to a copy       │
//! │                                              store.set(key, copy)       │
//! │                                              commit copy, notify        │
//! │                                                                         │
//! │  Render cart ──────► products() ───────────► last committed snapshot    │
//! │                                                                         │
//! │  NOTE: the lock is held across the storage write, so two quick taps     │
//! │        run one after the other and neither update is lost.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency
//! The in-memory list changes only after the write succeeded. A failed
//! write returns `CartError::Storage` and leaves both copies as they were.

use std::sync::Arc;

use marketplace_core::{CartChange, CartList, CoreResult, NewProduct, Product, PRODUCTS_STORAGE_KEY};
use marketplace_store::KeyValueStore;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::error::CartResult;
use crate::state::record;

/// Options the provider is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartOptions {
    /// Key of the persisted record.
    pub storage_key: String,

    /// Start with an empty cart instead of failing when the stored
    /// record cannot be decoded.
    pub discard_corrupt_record: bool,
}

impl Default for CartOptions {
    fn default() -> Self {
        CartOptions {
            storage_key: PRODUCTS_STORAGE_KEY.to_string(),
            discard_corrupt_record: false,
        }
    }
}

struct Shared {
    store: Arc<dyn KeyValueStore>,
    key: String,
    cart: Mutex<CartList>,
    changes: watch::Sender<Vec<Product>>,
}

/// The cart state container.
///
/// Cloning is cheap and every clone refers to the same cart.
#[derive(Clone)]
pub struct CartProvider {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for CartProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartProvider")
            .field("key", &self.shared.key)
            .field("items", &self.shared.changes.borrow().len())
            .finish()
    }
}

impl CartProvider {
    /// Builds the provider, adopting the persisted record if one exists.
    ///
    /// ## Startup
    /// 1. `store.get(key)`
    /// 2. absent → empty cart
    /// 3. present → decode; a corrupt record fails with
    ///    `CartError::CorruptRecord` unless `discard_corrupt_record` is set
    pub async fn load(store: Arc<dyn KeyValueStore>, options: CartOptions) -> CartResult<Self> {
        let CartOptions {
            storage_key,
            discard_corrupt_record,
        } = options;

        let list = match store.get(&storage_key).await? {
            None => {
                info!(key = %storage_key, "No persisted cart, starting empty");
                CartList::new()
            }
            Some(bytes) => match record::decode(&bytes) {
                Ok(list) => {
                    info!(key = %storage_key, items = list.len(), "Loaded persisted cart");
                    list
                }
                Err(err) if discard_corrupt_record => {
                    warn!(key = %storage_key, error = %err, "Discarding corrupt cart record");
                    CartList::new()
                }
                Err(err) => return Err(err),
            },
        };

        let (changes, _) = watch::channel(list.items().to_vec());

        Ok(CartProvider {
            shared: Arc::new(Shared {
                store,
                key: storage_key,
                cart: Mutex::new(list),
                changes,
            }),
        })
    }

    /// Current line items, newest first.
    pub fn products(&self) -> Vec<Product> {
        self.shared.changes.borrow().clone()
    }

    /// Observes every committed version of the list.
    ///
    /// The receiver starts out holding the current list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.shared.changes.subscribe()
    }

    /// The storage key this provider writes to.
    pub fn storage_key(&self) -> &str {
        &self.shared.key
    }

    /// Adds a product with quantity 1 at the front, or increments it when
    /// its id is already in the cart.
    pub async fn add_to_cart(&self, item: NewProduct) -> CartResult<CartChange> {
        debug!(id = %item.id, "add_to_cart");
        self.mutate(|cart| cart.add(item)).await
    }

    /// Increments the quantity of an item already in the cart.
    pub async fn increment(&self, id: &str) -> CartResult<CartChange> {
        debug!(id = %id, "increment");
        self.mutate(|cart| {
            cart.increment(id)
                .map(|quantity| CartChange::Incremented { quantity })
        })
        .await
    }

    /// Decrements the quantity of an item, removing it at quantity 1.
    pub async fn decrement(&self, id: &str) -> CartResult<CartChange> {
        debug!(id = %id, "decrement");
        self.mutate(|cart| cart.decrement(id)).await
    }

    /// Read-modify-write under the cart lock.
    async fn mutate<F>(&self, op: F) -> CartResult<CartChange>
    where
        F: FnOnce(&mut CartList) -> CoreResult<CartChange>,
    {
        let mut cart = self.shared.cart.lock().await;

        let mut next = cart.clone();
        let change = op(&mut next)?;

        let bytes = record::encode(&next)?;
        self.shared.store.set(&self.shared.key, &bytes).await?;

        *cart = next;
        self.shared.changes.send_replace(cart.items().to_vec());

        debug!(?change, items = cart.len(), "Cart updated");
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CartError;
    use marketplace_core::Money;
    use marketplace_store::MemoryStore;

    fn item(id: &str) -> NewProduct {
        NewProduct::new(id, format!("Item {}", id), "u", Money::from_cents(1000))
    }

    async fn provider_with(store: Arc<MemoryStore>) -> CartProvider {
        CartProvider::load(store, CartOptions::default()).await.unwrap()
    }

    async fn persisted(store: &MemoryStore) -> Vec<Product> {
        let bytes = store.raw(PRODUCTS_STORAGE_KEY).await.unwrap();
        record::decode(&bytes).unwrap().into_items()
    }

    #[tokio::test]
    async fn test_starts_empty_without_record() {
        let store = Arc::new(MemoryStore::new());
        let cart = provider_with(store.clone()).await;

        assert!(cart.products().is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_each_mutation_writes_once_and_agrees() {
        let store = Arc::new(MemoryStore::new());
        let cart = provider_with(store.clone()).await;

        cart.add_to_cart(item("a")).await.unwrap();
        assert_eq!(store.write_count(), 1);
        assert_eq!(persisted(&store).await, cart.products());

        cart.add_to_cart(item("b")).await.unwrap();
        cart.increment("a").await.unwrap();
        cart.decrement("b").await.unwrap();
        assert_eq!(store.write_count(), 4);
        assert_eq!(persisted(&store).await, cart.products());
    }

    #[tokio::test]
    async fn test_missing_id_does_not_write() {
        let store = Arc::new(MemoryStore::new());
        let cart = provider_with(store.clone()).await;
        cart.add_to_cart(item("a")).await.unwrap();

        let err = cart.increment("nope").await.unwrap_err();
        assert!(matches!(err, CartError::ItemNotFound(ref id) if id == "nope"));
        let err = cart.decrement("nope").await.unwrap_err();
        assert!(matches!(err, CartError::ItemNotFound(_)));

        assert_eq!(store.write_count(), 1);
        assert_eq!(cart.products().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_memory_unchanged() {
        let store = Arc::new(MemoryStore::new());
        let cart = provider_with(store.clone()).await;
        cart.add_to_cart(item("a")).await.unwrap();
        let before = cart.products();

        store.fail_writes(true);
        let err = cart.increment("a").await.unwrap_err();
        assert!(matches!(err, CartError::Storage(_)));
        assert_eq!(cart.products(), before);
        assert_eq!(persisted(&store).await, before);

        store.fail_writes(false);
        cart.increment("a").await.unwrap();
        assert_eq!(cart.products()[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_add_takes_display_fields_as_given() {
        let store = Arc::new(MemoryStore::new());
        let cart = provider_with(store.clone()).await;
        let long_id = "x".repeat(129);

        cart.add_to_cart(NewProduct::new("a", "", "u", Money::from_cents(10)))
            .await
            .unwrap();
        cart.add_to_cart(NewProduct::new(long_id.as_str(), "T", "", Money::from_cents(-1)))
            .await
            .unwrap();

        let products = cart.products();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, long_id);
        assert_eq!(products[1].title, "");
        assert_eq!(persisted(&store).await, products);

        // Reload adopts what was accepted
        let reloaded = provider_with(store.clone()).await;
        assert_eq!(reloaded.products(), products);

        let err = cart
            .add_to_cart(NewProduct::new("", "T", "u", Money::from_cents(10)))
            .await
            .unwrap_err();
        assert!(matches!(err, CartError::Rule(_)));
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_read_failure_surfaces_at_load() {
        let store = Arc::new(MemoryStore::new());
        store.fail_reads(true);

        let result = CartProvider::load(store, CartOptions::default()).await;
        assert!(matches!(result, Err(CartError::Storage(_))));
    }

    #[tokio::test]
    async fn test_corrupt_record_policy() {
        let store = Arc::new(MemoryStore::with_entry(
            PRODUCTS_STORAGE_KEY,
            b"definitely not json".to_vec(),
        ));

        let strict = CartProvider::load(store.clone(), CartOptions::default()).await;
        assert!(matches!(strict, Err(CartError::CorruptRecord { .. })));

        let options = CartOptions {
            discard_corrupt_record: true,
            ..CartOptions::default()
        };
        let lenient = CartProvider::load(store.clone(), options).await.unwrap();
        assert!(lenient.products().is_empty());

        // The first mutation replaces the corrupt record
        lenient.add_to_cart(item("a")).await.unwrap();
        assert_eq!(persisted(&store).await.len(), 1);
    }

    #[tokio::test]
    async fn test_custom_storage_key() {
        let store = Arc::new(MemoryStore::new());
        let options = CartOptions {
            storage_key: "@Test:cart".to_string(),
            ..CartOptions::default()
        };
        let cart = CartProvider::load(store.clone(), options).await.unwrap();
        cart.add_to_cart(item("a")).await.unwrap();

        assert!(store.raw("@Test:cart").await.is_some());
        assert!(store.raw(PRODUCTS_STORAGE_KEY).await.is_none());
        assert_eq!(cart.storage_key(), "@Test:cart");
    }

    #[tokio::test]
    async fn test_subscribers_see_commits() {
        let store = Arc::new(MemoryStore::new());
        let cart = provider_with(store).await;
        let mut rx = cart.subscribe();
        assert!(rx.borrow_and_update().is_empty());

        cart.add_to_cart(item("a")).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update()[0].id, "a");

        // Failed operations do not notify
        let _ = cart.increment("missing").await;
        assert!(!rx.has_changed().unwrap());
    }
}
