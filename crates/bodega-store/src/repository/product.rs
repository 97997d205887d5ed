//! # Product Repository
//!
//! CRUD operations over the product catalog.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a Catalog Read Works                             │
//! │                                                                         │
//! │  load_all()                                                            │
//! │       │                                                                 │
//! │       ├── cache populated? ──► return snapshot (no storage I/O)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  seed_if_needed()          (first-ever use only)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  products:index ──► ["1001", "1002", ...]                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  product:<id> fetched per ID, in index order                           │
//! │       │         (IDs with no record are logged and dropped)            │
//! │       ▼                                                                 │
//! │  cache repopulated ──► Vec<Product> returned                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write Discipline
//! Every mutation writes the entity record and the re-derived index in ONE
//! [`WriteBatch`] transaction, then replaces the cache with the new
//! snapshot. External writers that bypass these methods must call
//! [`ProductRepository::invalidate_cache`] afterwards.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use bodega_core::validation::{validate_product_draft, validate_product_patch};
use bodega_core::{Product, ProductDraft, ProductPatch};

use crate::cache::CollectionCache;
use crate::error::{StoreError, StoreResult};
use crate::index::EntityIndex;
use crate::keys;
use crate::kv::{KvStore, WriteBatch};
use crate::seed;

/// Repository for product catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.products();
///
/// let all = repo.load_all().await?;
/// let one = repo.get_by_id("1001").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    kv: KvStore,
    index: EntityIndex,
    cache: Arc<CollectionCache<Product>>,
}

impl ProductRepository {
    /// Creates a new ProductRepository sharing the given cache.
    pub fn new(kv: KvStore, cache: Arc<CollectionCache<Product>>) -> Self {
        let index = EntityIndex::new(kv.clone(), keys::PRODUCTS_INDEX);
        ProductRepository { kv, index, cache }
    }

    /// Populates the store from the bundled fixture on first-ever use.
    ///
    /// "First-ever" means the index key has never been written; a populated
    /// (even empty) index short-circuits re-seeding, so this is idempotent.
    ///
    /// ## Returns
    /// * `Ok(true)` - fixtures were written
    /// * `Ok(false)` - already seeded, nothing done
    pub async fn seed_if_needed(&self) -> StoreResult<bool> {
        if self.index.exists().await? {
            return Ok(false);
        }

        let fixtures = seed::fixture_products()?;
        let ids: Vec<String> = fixtures.iter().map(|p| p.id.clone()).collect();

        // One transaction: the index and every record land together.
        let mut batch = WriteBatch::new();
        self.index.save_into(&mut batch, &ids)?;
        for product in &fixtures {
            batch.put(&keys::product(&product.id), product)?;
        }
        self.kv.apply(batch).await?;

        info!(count = fixtures.len(), "Seeded product fixtures");
        Ok(true)
    }

    /// Loads the full catalog, in index order.
    ///
    /// Returns the cached snapshot when one exists; otherwise seeds if
    /// needed, materializes from the store, and repopulates the cache.
    /// Index IDs whose record fails to resolve are dropped, never returned
    /// as partial placeholders.
    pub async fn load_all(&self) -> StoreResult<Vec<Product>> {
        if let Some(cached) = self.cache.get().await {
            return Ok(cached);
        }

        self.seed_if_needed().await?;

        let ids = self.index.load().await?;
        let mut products = Vec::with_capacity(ids.len());
        for id in &ids {
            match self.kv.get::<Product>(&keys::product(id)).await? {
                Some(product) => products.push(product),
                None => {
                    warn!(id = %id, "Index references a missing product record; dropping");
                }
            }
        }

        debug!(count = products.len(), "Catalog materialized from store");
        self.cache.replace(products.clone()).await;
        Ok(products)
    }

    /// Gets a product by ID: cache scan first, direct store read on miss.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - found in cache or store
    /// * `Ok(None)` - not found by either path
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        if let Some(cached) = self.cache.get().await {
            if let Some(product) = cached.into_iter().find(|p| p.id == id) {
                return Ok(Some(product));
            }
        }

        self.kv.get::<Product>(&keys::product(id)).await
    }

    /// Creates a product from a draft.
    ///
    /// Generates a fresh UUID v4 id (collision-free without coordination),
    /// persists the record plus the appended index in one transaction, and
    /// returns the created entity.
    pub async fn add(&self, draft: ProductDraft) -> StoreResult<Product> {
        validate_product_draft(&draft)?;

        let mut products = self.load_all().await?;
        let product = draft.into_product(Uuid::new_v4().to_string());

        let mut ids: Vec<String> = products.iter().map(|p| p.id.clone()).collect();
        ids.push(product.id.clone());

        let mut batch = WriteBatch::new();
        batch.put(&keys::product(&product.id), &product)?;
        self.index.save_into(&mut batch, &ids)?;
        self.kv.apply(batch).await?;

        debug!(id = %product.id, name = %product.name, "Product added");

        products.push(product.clone());
        self.cache.replace(products).await;
        Ok(product)
    }

    /// Applies a typed patch to an existing product.
    ///
    /// The `id` field is never overwritten (it isn't even representable in
    /// the patch). The index is re-saved from the in-memory list to keep it
    /// consistent even though membership is unchanged.
    ///
    /// ## Errors
    /// * `StoreError::NotFound` - `id` absent from the loaded collection
    pub async fn update_by_id(&self, id: &str, patch: ProductPatch) -> StoreResult<Product> {
        validate_product_patch(&patch)?;

        let mut products = self.load_all().await?;
        let position = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        let updated = patch.apply_to(&products[position]);
        products[position] = updated.clone();

        let ids: Vec<String> = products.iter().map(|p| p.id.clone()).collect();

        let mut batch = WriteBatch::new();
        batch.put(&keys::product(id), &updated)?;
        self.index.save_into(&mut batch, &ids)?;
        self.kv.apply(batch).await?;

        debug!(id = %id, "Product updated");

        self.cache.replace(products).await;
        Ok(updated)
    }

    /// Deletes a product by ID.
    ///
    /// Removes the record and persists the index without that ID in one
    /// transaction.
    ///
    /// ## Errors
    /// * `StoreError::NotFound` - `id` absent from the loaded collection
    pub async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let products = self.load_all().await?;
        if !products.iter().any(|p| p.id == id) {
            return Err(StoreError::not_found("Product", id));
        }

        let remaining: Vec<Product> = products.into_iter().filter(|p| p.id != id).collect();
        let ids: Vec<String> = remaining.iter().map(|p| p.id.clone()).collect();

        let mut batch = WriteBatch::new();
        batch.delete(&keys::product(id));
        self.index.save_into(&mut batch, &ids)?;
        self.kv.apply(batch).await?;

        debug!(id = %id, "Product deleted");

        self.cache.replace(remaining).await;
        Ok(())
    }

    /// Clears the in-memory cache unconditionally.
    ///
    /// Must be called after any external mutation that bypasses the
    /// cache-aware methods above; the next `load_all()` re-reads the store.
    pub async fn invalidate_cache(&self) {
        self.cache.invalidate().await;
    }

    /// Counts catalog entries via the index (for diagnostics/seed tooling).
    pub async fn count(&self) -> StoreResult<usize> {
        Ok(self.index.load().await?.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};
    use bodega_core::ProductCategory;

    async fn open_store() -> Store {
        Store::open(StoreConfig::in_memory()).await.unwrap()
    }

    fn widget_draft() -> ProductDraft {
        ProductDraft {
            name: "Widget".to_string(),
            description: "A perfectly ordinary widget".to_string(),
            price: 9.99,
            stock: 5,
            category: ProductCategory::Other,
            vendor: "Acme".to_string(),
            image_url: "https://img.bodega.example/widget.jpg".to_string(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let store = open_store().await;
        let repo = store.products();

        assert!(repo.seed_if_needed().await.unwrap());
        assert!(!repo.seed_if_needed().await.unwrap());

        repo.invalidate_cache().await;
        let all = repo.load_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_empty_index_short_circuits_seeding() {
        let store = open_store().await;
        let repo = store.products();

        // A populated-but-empty index means "user deleted everything",
        // not "first-ever use".
        repo.seed_if_needed().await.unwrap();
        for product in repo.load_all().await.unwrap() {
            repo.delete_by_id(&product.id).await.unwrap();
        }

        assert!(!repo.seed_if_needed().await.unwrap());
        repo.invalidate_cache().await;
        assert!(repo.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_then_get_by_id_round_trips() {
        let store = open_store().await;
        let repo = store.products();

        let created = repo.add(widget_draft()).await.unwrap();
        let fetched = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        // And again straight from the store, bypassing the cache.
        repo.invalidate_cache().await;
        let fetched = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_draft() {
        let store = open_store().await;
        let repo = store.products();

        let mut draft = widget_draft();
        draft.price = -1.0;
        let err = repo.add(draft).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found_and_changes_nothing() {
        let store = open_store().await;
        let repo = store.products();
        repo.seed_if_needed().await.unwrap();
        let before = repo.load_all().await.unwrap();

        let patch = ProductPatch {
            price: Some(1.0),
            ..ProductPatch::default()
        };
        let err = repo.update_by_id("no-such-id", patch).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        repo.invalidate_cache().await;
        assert_eq!(repo.load_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let store = open_store().await;
        let repo = store.products();
        repo.seed_if_needed().await.unwrap();

        let before = repo.load_all().await.unwrap();
        let victim = before[1].id.clone();

        repo.delete_by_id(&victim).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), before.len() - 1);
        assert_eq!(repo.get_by_id(&victim).await.unwrap(), None);

        // Second delete of the same id fails.
        let err = repo.delete_by_id(&victim).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_index_order_is_insertion_order() {
        let store = open_store().await;
        let repo = store.products();
        repo.seed_if_needed().await.unwrap();

        let mut draft = widget_draft();
        draft.name = "Zeta Widget".to_string();
        let added = repo.add(draft).await.unwrap();

        repo.invalidate_cache().await;
        let all = repo.load_all().await.unwrap();
        assert_eq!(all.last().unwrap().id, added.id);
    }

    #[tokio::test]
    async fn test_missing_record_is_dropped_on_load() {
        let store = open_store().await;
        let repo = store.products();
        repo.seed_if_needed().await.unwrap();
        let all = repo.load_all().await.unwrap();

        // Simulate an external writer deleting a record but not the index,
        // then honoring the invalidation contract.
        store.kv().remove(&keys::product(&all[0].id)).await.unwrap();
        repo.invalidate_cache().await;

        let reloaded = repo.load_all().await.unwrap();
        assert_eq!(reloaded.len(), all.len() - 1);
        assert!(reloaded.iter().all(|p| p.id != all[0].id));
    }

    #[tokio::test]
    async fn test_corrupt_record_is_dropped_on_load() {
        let store = open_store().await;
        let repo = store.products();
        repo.seed_if_needed().await.unwrap();
        let all = repo.load_all().await.unwrap();

        store
            .kv()
            .set_raw(&keys::product(&all[0].id), "{broken")
            .await
            .unwrap();
        repo.invalidate_cache().await;

        let reloaded = repo.load_all().await.unwrap();
        assert_eq!(reloaded.len(), all.len() - 1);
    }

    #[tokio::test]
    async fn test_round_trip_preserves_numeric_precision() {
        let store = open_store().await;
        let repo = store.products();

        let mut draft = widget_draft();
        draft.price = 12.5;
        draft.stock = 7;
        let created = repo.add(draft).await.unwrap();

        repo.invalidate_cache().await;
        let reloaded = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(reloaded.price, 12.5);
        assert_eq!(reloaded.stock, 7);
        assert_eq!(reloaded, created);
    }

    /// The end-to-end catalog scenario:
    /// seed 3 → add → 4 → patch price → read back → delete → 3.
    #[tokio::test]
    async fn test_full_catalog_scenario() {
        let store = open_store().await;
        let repo = store.products();

        repo.seed_if_needed().await.unwrap();
        assert_eq!(repo.load_all().await.unwrap().len(), 3);

        let widget = repo.add(widget_draft()).await.unwrap();
        assert_eq!(repo.load_all().await.unwrap().len(), 4);

        let patch = ProductPatch {
            price: Some(12.50),
            ..ProductPatch::default()
        };
        repo.update_by_id(&widget.id, patch).await.unwrap();
        let fetched = repo.get_by_id(&widget.id).await.unwrap().unwrap();
        assert_eq!(fetched.price, 12.50);
        assert_eq!(fetched.id, widget.id);

        repo.delete_by_id(&widget.id).await.unwrap();

        repo.invalidate_cache().await;
        let remaining = repo.load_all().await.unwrap();
        assert_eq!(remaining.len(), 3);
        assert!(remaining.iter().all(|p| p.id != widget.id));
    }
}
