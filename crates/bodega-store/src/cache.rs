//! # Collection Cache
//!
//! In-memory materialization of a collection to avoid repeated storage
//! reads; invalidated on every write.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cache Lifecycle                                    │
//! │                                                                         │
//! │   (empty) ──first load_all()──► populated ──any write──► replaced      │
//! │      ▲                              │                                   │
//! │      └────────invalidate()──────────┘                                   │
//! │                                                                         │
//! │   The next read after invalidate() re-hydrates from the store.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Not Module-Level State?
//! The original app kept `cachedProducts` as module-global mutable state,
//! which makes isolated tests impossible. Here the cache is an explicit
//! object owned through the [`Store`](crate::Store) handle; two stores never
//! share cache entries.

use std::sync::Arc;

use tokio::sync::RwLock;

/// Lazily populated snapshot of a full collection.
#[derive(Debug)]
pub struct CollectionCache<T> {
    slot: RwLock<Option<Vec<T>>>,
}

impl<T: Clone> CollectionCache<T> {
    /// Creates an empty (not yet populated) cache.
    pub fn new() -> Arc<Self> {
        Arc::new(CollectionCache {
            slot: RwLock::new(None),
        })
    }

    /// Returns the cached collection, or `None` when not populated.
    pub async fn get(&self) -> Option<Vec<T>> {
        self.slot.read().await.clone()
    }

    /// Replaces the cached collection with a fresh snapshot.
    pub async fn replace(&self, items: Vec<T>) {
        *self.slot.write().await = Some(items);
    }

    /// Clears the cache unconditionally; the next read re-hydrates.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }

    /// True when a snapshot is currently held.
    pub async fn is_populated(&self) -> bool {
        self.slot.read().await.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
