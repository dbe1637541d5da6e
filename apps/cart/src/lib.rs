//! # GoMarketplace Cart Library
//!
//! The shopping-cart state container and the startup wiring around it.
//!
//! ## Module Organization
//! ```text
//! marketplace_cart/
//! ├── lib.rs          ◄─── You are here (logging, store, bootstrap)
//! ├── cli.rs          ◄─── Argument parsing & dispatch for the binary
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartProvider (list + persisted mirror)
//! │   ├── context.rs  ◄─── provide() / use_cart() scope
//! │   ├── record.rs   ◄─── Persisted record encode/decode
//! │   └── config.rs   ◄─── CartConfig (TOML + environment)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── cart.rs     ◄─── Cart commands (get, add, +, -)
//! └── error.rs        ◄─── CartError and ErrorResponse
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. init_tracing()          EnvFilter, RUST_LOG overrides the default   │
//! │  2. CartConfig::load()      defaults ◄ cart.toml ◄ MARKETPLACE_* env    │
//! │  3. open_store()            SqliteStore (migrated) or MemoryStore       │
//! │  4. CartProvider::load()    adopt the persisted record if present       │
//! │  5. provider.provide(..)    commands run inside the scope               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::sync::Arc;

use marketplace_store::{Database, KeyValueStore, MemoryStore, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::{CartError, CartResult};
use state::{CartConfig, CartProvider, StorageBackend};

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=marketplace=trace` - Show trace for marketplace crates only
/// - Default: INFO, DEBUG for marketplace crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,marketplace=debug,sqlx=warn"));

    // A second call (tests, embedding apps) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Opens the key/value store selected by `config`.
///
/// For SQLite the parent directory is created and migrations are run.
pub async fn open_store(config: &CartConfig) -> CartResult<Arc<dyn KeyValueStore>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory cart storage");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Sqlite => {
            let path = config.database_path()?;

            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        CartError::config(format!("{}: {}", parent.display(), e))
                    })?;
                }
            }

            info!(?path, "Using SQLite cart storage");
            let db = Database::new(StoreConfig::new(path)).await?;
            Ok(Arc::new(db.kv()))
        }
    }
}

/// Opens the configured store and loads the cart from it.
pub async fn bootstrap(config: &CartConfig) -> CartResult<CartProvider> {
    let store = open_store(config).await?;
    CartProvider::load(store, config.cart_options()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketplace_core::{Money, NewProduct};

    fn sqlite_config(path: std::path::PathBuf) -> CartConfig {
        let mut config = CartConfig::default();
        config.storage.database_path = Some(path);
        config
    }

    #[tokio::test]
    async fn test_bootstrap_memory_backend() {
        let mut config = CartConfig::default();
        config.storage.backend = StorageBackend::Memory;

        let cart = bootstrap(&config).await.unwrap();
        assert!(cart.products().is_empty());
        assert_eq!(cart.storage_key(), config.storage.key);
    }

    #[tokio::test]
    async fn test_bootstrap_sqlite_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cart.db");
        let config = sqlite_config(path.clone());

        let cart = bootstrap(&config).await.unwrap();
        cart.add_to_cart(NewProduct::new("a", "T", "u", Money::from_cents(10)))
            .await
            .unwrap();

        assert!(path.exists());

        let reloaded = bootstrap(&config).await.unwrap();
        assert_eq!(reloaded.products(), cart.products());
    }
}
