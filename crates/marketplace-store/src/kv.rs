//! # Key/Value Store Trait
//!
//! The storage seam the cart provider is built on.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storage Injection                                    │
//! │                                                                         │
//! │  CartProvider ── Arc<dyn KeyValueStore> ──┬── SqliteStore (device)      │
//! │                                           └── MemoryStore (tests, CLI)  │
//! │                                                                         │
//! │  The provider never reaches for a global; whoever builds it decides     │
//! │  which store it writes to.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;

use crate::error::StoreResult;

/// A byte-string key/value store.
///
/// Implementations must be safe to share across tasks. A `set` that returns
/// `Ok(())` is durable as far as the backend can promise.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Deletes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> StoreResult<()>;
}
