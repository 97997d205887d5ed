//! # Entity Index
//!
//! The ordered list of entity IDs that defines a logical collection.
//!
//! ## Role
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Index + Entity Records                              │
//! │                                                                         │
//! │  products:index  ──►  ["1001", "1002", "1003"]    (order = insertion)  │
//! │                          │       │       │                              │
//! │                          ▼       ▼       ▼                              │
//! │                    product:1001  product:1002  product:1003            │
//! │                                                                         │
//! │  Invariant: the index is a superset key-list. An ID with no backing    │
//! │  record is filtered out when the collection is materialized.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Used exclusively by the repository layer; nothing outside this crate
//! manipulates the index directly.

use crate::error::StoreResult;
use crate::kv::{KvStore, WriteBatch};

/// Ordered ID list stored under a fixed key.
#[derive(Debug, Clone)]
pub struct EntityIndex {
    kv: KvStore,
    key: &'static str,
}

impl EntityIndex {
    /// Creates an index handle for the given fixed key.
    pub fn new(kv: KvStore, key: &'static str) -> Self {
        EntityIndex { kv, key }
    }

    /// The fixed storage key of this index.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Loads the ordered ID list, defaulting to empty when absent
    /// (or corrupt, which the KV layer reports as absent).
    pub async fn load(&self) -> StoreResult<Vec<String>> {
        Ok(self.kv.get::<Vec<String>>(self.key).await?.unwrap_or_default())
    }

    /// Overwrites the stored list in a single underlying write.
    pub async fn save(&self, ids: &[String]) -> StoreResult<()> {
        self.kv.set(self.key, ids).await
    }

    /// Queues the overwrite into a composite batch so the index and the
    /// entity records it references commit together.
    pub fn save_into(&self, batch: &mut WriteBatch, ids: &[String]) -> StoreResult<()> {
        batch.put(self.key, ids)?;
        Ok(())
    }

    /// True when the index key has ever been written.
    pub async fn exists(&self) -> StoreResult<bool> {
        self.kv.contains(self.key).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};

    async fn index() -> EntityIndex {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();
        EntityIndex::new(store.kv(), "test:index")
    }

    #[tokio::test]
    async fn test_load_defaults_to_empty() {
        let index = index().await;
        assert!(!index.exists().await.unwrap());
        assert!(index.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_load_preserves_order() {
        let index = index().await;
        let ids = vec!["c".to_string(), "a".to_string(), "b".to_string()];

        index.save(&ids).await.unwrap();

        assert!(index.exists().await.unwrap());
        assert_eq!(index.load().await.unwrap(), ids);
    }

    #[tokio::test]
    async fn test_save_overwrites_membership() {
        let index = index().await;
        index.save(&["a".to_string(), "b".to_string()]).await.unwrap();
        index.save(&["b".to_string()]).await.unwrap();

        assert_eq!(index.load().await.unwrap(), vec!["b".to_string()]);
    }
}
