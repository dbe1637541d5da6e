//! # SQLite Key/Value Store
//!
//! `KeyValueStore` over the `kv_store` table.
//!
//! ```text
//! ┌──────────────────────────────┬──────────────────────┬──────────────────┐
//! │ key (TEXT PK)                │ value (BLOB)         │ updated_at       │
//! ├──────────────────────────────┼──────────────────────┼──────────────────┤
//! │ @GoMarketplace:products      │ [{"id":"a",...}]     │ 2026-...Z        │
//! └──────────────────────────────┴──────────────────────┴──────────────────┘
//! ```

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Key/value store backed by a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a store over an already-migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let value: Option<Vec<u8>> =
            sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key = %key, found = value.is_some(), "kv get");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        debug!(key = %key, bytes = value.len(), "kv set");

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        debug!(key = %key, "kv remove");

        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::pool::{Database, StoreConfig};

    async fn test_store() -> (Database, SqliteStore) {
        let db = Database::new(StoreConfig::in_memory()).await.unwrap();
        let store = db.kv();
        (db, store)
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let (_db, store) = test_store().await;
        assert_eq!(store.get("@GoMarketplace:products").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let (_db, store) = test_store().await;

        store.set("k", b"[]").await.unwrap();
        store.set("k", br#"[{"id":"a"}]"#).await.unwrap();

        assert_eq!(
            store.get("k").await.unwrap(),
            Some(br#"[{"id":"a"}]"#.to_vec())
        );
    }

    #[tokio::test]
    async fn test_remove() {
        let (_db, store) = test_store().await;

        store.set("k", b"v").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);

        // Removing twice is fine
        store.remove("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.db");

        let db = Database::new(StoreConfig::new(&path)).await.unwrap();
        db.kv().set("k", b"persisted").await.unwrap();
        db.close().await;

        let db = Database::new(StoreConfig::new(&path)).await.unwrap();
        assert_eq!(db.kv().get("k").await.unwrap(), Some(b"persisted".to_vec()));
    }

    #[tokio::test]
    async fn test_closed_pool_is_unavailable() {
        let (db, store) = test_store().await;
        db.close().await;

        assert!(matches!(
            store.set("k", b"v").await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
