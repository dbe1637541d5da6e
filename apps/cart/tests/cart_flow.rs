//! End-to-end cart flows against the real stores.

use std::sync::Arc;

use marketplace_cart::commands::cart as commands;
use marketplace_cart::error::CartError;
use marketplace_cart::state::{record, CartOptions, CartProvider};
use marketplace_core::{CartChange, Money, NewProduct, Product, PRODUCTS_STORAGE_KEY};
use marketplace_store::{Database, KeyValueStore, MemoryStore, SqliteStore, StoreConfig};

fn camiseta() -> NewProduct {
    NewProduct::new("a", "T", "u", Money::from_cents(1000))
}

async fn sqlite_store(path: &std::path::Path) -> SqliteStore {
    Database::new(StoreConfig::new(path)).await.unwrap().kv()
}

async fn persisted(store: &dyn KeyValueStore) -> Vec<Product> {
    match store.get(PRODUCTS_STORAGE_KEY).await.unwrap() {
        Some(bytes) => record::decode(&bytes).unwrap().into_items(),
        None => Vec::new(),
    }
}

#[tokio::test]
async fn add_increment_decrement_until_empty() {
    let store = Arc::new(MemoryStore::new());
    let cart = CartProvider::load(store.clone(), CartOptions::default())
        .await
        .unwrap();

    assert_eq!(cart.add_to_cart(camiseta()).await.unwrap(), CartChange::Added);
    let products = cart.products();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, "a");
    assert_eq!(products[0].quantity, 1);
    assert_eq!(products[0].price, Money::from_cents(1000));

    cart.increment("a").await.unwrap();
    assert_eq!(cart.products()[0].quantity, 2);

    cart.decrement("a").await.unwrap();
    assert_eq!(cart.products()[0].quantity, 1);

    assert_eq!(cart.decrement("a").await.unwrap(), CartChange::Removed);
    assert!(cart.products().is_empty());
    assert!(persisted(store.as_ref()).await.is_empty());
}

#[tokio::test]
async fn cart_survives_restart_on_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.db");

    {
        let cart = CartProvider::load(Arc::new(sqlite_store(&path).await), CartOptions::default())
            .await
            .unwrap();
        cart.add_to_cart(camiseta()).await.unwrap();
        cart.add_to_cart(NewProduct::new("b", "Caneca", "u2", Money::from_cents(550)))
            .await
            .unwrap();
        cart.increment("a").await.unwrap();
    }

    let cart = CartProvider::load(Arc::new(sqlite_store(&path).await), CartOptions::default())
        .await
        .unwrap();
    let products = cart.products();

    assert_eq!(
        products.iter().map(|p| (p.id.as_str(), p.quantity)).collect::<Vec<_>>(),
        vec![("b", 1), ("a", 2)]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_increments_are_not_lost() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(sqlite_store(&dir.path().join("cart.db")).await);
    let cart = CartProvider::load(store.clone(), CartOptions::default())
        .await
        .unwrap();
    cart.add_to_cart(camiseta()).await.unwrap();

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let cart = cart.clone();
            tokio::spawn(async move { cart.increment("a").await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(cart.products()[0].quantity, 51);
    assert_eq!(persisted(store.as_ref()).await, cart.products());
}

#[tokio::test]
async fn memory_and_record_agree_after_every_step() {
    let store = Arc::new(MemoryStore::new());
    let cart = CartProvider::load(store.clone(), CartOptions::default())
        .await
        .unwrap();

    cart.add_to_cart(camiseta()).await.unwrap();
    assert_eq!(persisted(store.as_ref()).await, cart.products());

    cart.add_to_cart(NewProduct::new("b", "B", "u", Money::from_cents(1)))
        .await
        .unwrap();
    assert_eq!(persisted(store.as_ref()).await, cart.products());

    let _ = cart.increment("missing").await.unwrap_err();
    assert_eq!(persisted(store.as_ref()).await, cart.products());

    store.fail_writes(true);
    let _ = cart.decrement("a").await.unwrap_err();
    store.fail_writes(false);
    assert_eq!(persisted(store.as_ref()).await, cart.products());

    cart.decrement("a").await.unwrap();
    assert_eq!(persisted(store.as_ref()).await, cart.products());
}

#[tokio::test]
async fn adding_existing_id_matches_increment() {
    let via_add = CartProvider::load(Arc::new(MemoryStore::new()), CartOptions::default())
        .await
        .unwrap();
    let via_increment = CartProvider::load(Arc::new(MemoryStore::new()), CartOptions::default())
        .await
        .unwrap();

    for cart in [&via_add, &via_increment] {
        cart.add_to_cart(camiseta()).await.unwrap();
    }

    let change = via_add
        .add_to_cart(NewProduct::new("a", "Renamed", "other", Money::from_cents(1)))
        .await
        .unwrap();
    assert_eq!(change, CartChange::Incremented { quantity: 2 });
    via_increment.increment("a").await.unwrap();

    assert_eq!(via_add.products(), via_increment.products());
    assert_eq!(via_add.products()[0].title, "T");
}

#[tokio::test]
async fn corrupt_record_blocks_startup_unless_discarded() {
    let store = Arc::new(MemoryStore::with_entry(PRODUCTS_STORAGE_KEY, b"{not json".to_vec()));

    let err = CartProvider::load(store.clone(), CartOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::CorruptRecord { .. }));

    let cart = CartProvider::load(
        store.clone(),
        CartOptions {
            discard_corrupt_record: true,
            ..CartOptions::default()
        },
    )
    .await
    .unwrap();
    assert!(cart.products().is_empty());

    cart.add_to_cart(camiseta()).await.unwrap();
    assert_eq!(persisted(store.as_ref()).await, cart.products());
}

#[tokio::test]
async fn commands_run_inside_provider_scope_only() {
    let cart = CartProvider::load(Arc::new(MemoryStore::new()), CartOptions::default())
        .await
        .unwrap();

    let response = cart
        .provide(async {
            commands::add_to_cart(camiseta()).await?;
            commands::increment("a").await
        })
        .await
        .unwrap();
    assert_eq!(response.total_quantity, 2);

    assert!(matches!(
        commands::get_cart().await,
        Err(CartError::OutsideProvider)
    ));
}
