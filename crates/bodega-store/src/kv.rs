//! # Key-Value Store
//!
//! Async get/set/remove over string keys with JSON-serialized values,
//! backed by the single `kv_entries` SQLite table.
//!
//! ## Read/Write Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      KvStore Semantics                                  │
//! │                                                                         │
//! │  set(key, value)                                                       │
//! │  ├── serialize to JSON text ── error? → propagate (never silent)       │
//! │  └── upsert row                                                        │
//! │                                                                         │
//! │  get(key)                                                              │
//! │  ├── row absent          → Ok(None)                                    │
//! │  ├── JSON parse fails    → warn! + Ok(None)   (corrupt = absent)       │
//! │  └── otherwise           → Ok(Some(value))                             │
//! │                                                                         │
//! │  remove(key) / remove_many(keys)                                       │
//! │  └── missing keys are a no-op, not an error                            │
//! │                                                                         │
//! │  apply(WriteBatch)                                                     │
//! │  └── all puts + deletes in ONE transaction                             │
//! │      (entity record + index can never diverge halfway)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::StoreResult;

// =============================================================================
// Write Batch
// =============================================================================

/// A set of puts and deletes applied atomically.
///
/// ## Why This Exists
/// A composite write (entity record + collection index) interrupted midway
/// would leave the index pointing at records that don't exist, or records
/// unreachable from the index. Batching both into one SQLite transaction
/// closes that gap.
///
/// Values are serialized when they are added, so a serialization failure
/// surfaces before any I/O happens.
#[derive(Debug, Default)]
pub struct WriteBatch {
    puts: Vec<(String, String)>,
    deletes: Vec<String>,
}

impl WriteBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        WriteBatch::default()
    }

    /// Queues a put. The value is serialized eagerly.
    pub fn put<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> StoreResult<&mut Self> {
        let json = serde_json::to_string(value)?;
        self.puts.push((key.to_string(), json));
        Ok(self)
    }

    /// Queues a delete. Deleting a missing key is a no-op at apply time.
    pub fn delete(&mut self, key: &str) -> &mut Self {
        self.deletes.push(key.to_string());
        self
    }

    /// True when the batch carries no operations.
    pub fn is_empty(&self) -> bool {
        self.puts.is_empty() && self.deletes.is_empty()
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.puts.len() + self.deletes.len()
    }
}

// =============================================================================
// KvStore
// =============================================================================

/// String-keyed, JSON-valued store over SQLite.
///
/// ## Usage
/// ```rust,ignore
/// let kv = store.kv();
/// kv.set("userToken", &token).await?;
/// let token: Option<String> = kv.get("userToken").await?;
/// ```
#[derive(Debug, Clone)]
pub struct KvStore {
    pool: SqlitePool,
}

impl KvStore {
    /// Creates a new KvStore over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        KvStore { pool }
    }

    /// Serializes `value` to JSON text and upserts it under `key`.
    ///
    /// Serialization and storage errors both propagate to the caller;
    /// a silent failure here would let the cache and the store diverge.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value)?;

        sqlx::query(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(&json)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = json.len(), "kv set");
        Ok(())
    }

    /// Returns the deserialized value under `key`, or `None` when absent.
    ///
    /// ## Corrupt Data
    /// A row that exists but fails to parse is logged and reported as
    /// absent. Callers then fall back to defaults (empty index, no session)
    /// instead of wedging the whole app on one bad record.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let row: Option<String> = sqlx::query_scalar("SELECT value FROM kv_entries WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        let Some(json) = row else {
            return Ok(None);
        };

        match serde_json::from_str::<T>(&json) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(key = %key, error = %err, "Corrupt value in store; treating as absent");
                Ok(None)
            }
        }
    }

    /// True when a row exists under `key`, corrupt or not.
    ///
    /// Used by seeding to decide "first ever use" without deserializing.
    pub async fn contains(&self, key: &str) -> StoreResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM kv_entries WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    /// Deletes the row under `key`. Missing keys are a no-op.
    pub async fn remove(&self, key: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM kv_entries WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Deletes several keys in one transaction. Missing keys are a no-op.
    pub async fn remove_many(&self, keys: &[&str]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        for key in keys {
            sqlx::query("DELETE FROM kv_entries WHERE key = ?1")
                .bind(key)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Applies every put and delete in `batch` inside one transaction.
    ///
    /// Either the whole batch lands or none of it does.
    pub async fn apply(&self, batch: WriteBatch) -> StoreResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let ops = batch.len();
        let mut tx = self.pool.begin().await?;

        for (key, json) in &batch.puts {
            sqlx::query(
                "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            )
            .bind(key)
            .bind(json)
            .execute(&mut *tx)
            .await?;
        }

        for key in &batch.deletes {
            sqlx::query("DELETE FROM kv_entries WHERE key = ?1")
                .bind(key)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        debug!(ops, "kv batch applied");
        Ok(())
    }

    /// Stores a raw pre-serialized JSON string under `key`.
    ///
    /// Test helper for planting corrupt or hand-crafted rows.
    #[cfg(test)]
    pub(crate) async fn set_raw(&self, key: &str, raw: &str) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(raw)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::pool::{Store, StoreConfig};

    async fn kv() -> KvStore {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();
        store.kv()
    }

    #[tokio::test]
    async fn test_set_get_round_trip() {
        let kv = kv().await;

        kv.set("greeting", "hello").await.unwrap();
        let value: Option<String> = kv.get("greeting").await.unwrap();
        assert_eq!(value.as_deref(), Some("hello"));

        kv.set("numbers", &vec![1, 2, 3]).await.unwrap();
        let numbers: Option<Vec<i32>> = kv.get("numbers").await.unwrap();
        assert_eq!(numbers, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_get_absent_returns_none() {
        let kv = kv().await;
        let value: Option<String> = kv.get("missing").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let kv = kv().await;
        kv.set("k", &1).await.unwrap();
        kv.set("k", &2).await.unwrap();
        let value: Option<i32> = kv.get("k").await.unwrap();
        assert_eq!(value, Some(2));
    }

    #[tokio::test]
    async fn test_corrupt_value_treated_as_absent() {
        let kv = kv().await;
        kv.set_raw("bad", "{not json").await.unwrap();

        let value: Option<Vec<String>> = kv.get("bad").await.unwrap();
        assert_eq!(value, None);

        // The row itself still exists.
        assert!(kv.contains("bad").await.unwrap());
    }

    #[tokio::test]
    async fn test_serialization_error_propagates() {
        let kv = kv().await;
        // JSON has no representation for NaN.
        let result = kv.set("nan", &f64::NAN).await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
        assert!(!kv.contains("nan").await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_noop() {
        let kv = kv().await;
        kv.remove("never-written").await.unwrap();
        kv.remove_many(&["a", "b"]).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_many_deletes_all() {
        let kv = kv().await;
        kv.set("a", &1).await.unwrap();
        kv.set("b", &2).await.unwrap();
        kv.set("c", &3).await.unwrap();

        kv.remove_many(&["a", "b"]).await.unwrap();

        assert!(!kv.contains("a").await.unwrap());
        assert!(!kv.contains("b").await.unwrap());
        assert!(kv.contains("c").await.unwrap());
    }

    #[tokio::test]
    async fn test_batch_applies_puts_and_deletes() {
        let kv = kv().await;
        kv.set("old", "stale").await.unwrap();

        let mut batch = WriteBatch::new();
        batch.put("fresh", "new").unwrap();
        batch.put("index", &vec!["fresh"]).unwrap();
        batch.delete("old");
        assert_eq!(batch.len(), 3);

        kv.apply(batch).await.unwrap();

        let fresh: Option<String> = kv.get("fresh").await.unwrap();
        assert_eq!(fresh.as_deref(), Some("new"));
        assert!(!kv.contains("old").await.unwrap());
    }

    #[tokio::test]
    async fn test_batch_serialization_fails_before_io() {
        let mut batch = WriteBatch::new();
        let result = batch.put("nan", &f64::NAN);
        assert!(result.is_err());
        // The failed put left nothing queued.
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_is_noop() {
        let kv = kv().await;
        kv.apply(WriteBatch::new()).await.unwrap();
    }
}
