//! # bodega-store: Persistence Layer for Bodega
//!
//! Local, offline-first persistence for the catalog and auth domains:
//! a SQLite-backed key-value store, per-collection entity indexes,
//! in-memory caches with explicit invalidation, and the repositories the
//! UI layer consumes.
//!
//! ## Layer Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          bodega-store                                   │
//! │                                                                         │
//! │  ┌────────────────────┐      ┌────────────────────┐                    │
//! │  │ ProductRepository  │      │   AuthRepository   │   repositories     │
//! │  └─────────┬──────────┘      └─────────┬──────────┘                    │
//! │            │   CollectionCache (per collection, on the Store handle)   │
//! │  ┌─────────▼──────────┐      ┌─────────▼──────────┐                    │
//! │  │    EntityIndex     │      │  fixed session keys │   key layout      │
//! │  └─────────┬──────────┘      └─────────┬──────────┘                    │
//! │            └──────────┬────────────────┘                               │
//! │                 ┌─────▼─────┐                                          │
//! │                 │  KvStore  │  get / set / remove / WriteBatch         │
//! │                 └─────┬─────┘                                          │
//! │                 ┌─────▼─────┐                                          │
//! │                 │  SQLite   │  kv_entries(key, value) - WAL mode       │
//! │                 └───────────┘                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//! ```rust,ignore
//! use bodega_store::{Store, StoreConfig};
//!
//! let store = Store::open(StoreConfig::new("/data/bodega.db")).await?;
//!
//! let catalog = store.products().load_all().await?;     // seeds on first use
//! let session = store.auth().sign_in(credentials).await?;
//! ```
//!
//! ## Consistency Model
//! Composite writes (entity record + index, token + details) run in one
//! SQLite transaction, so the index never references a record that the same
//! write was supposed to create. Concurrent mutations against the same
//! entity are NOT serialized here; callers must not fire overlapping
//! mutations for one ID. No cancellation: every operation runs to
//! completion or returns an error.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cache;
pub mod error;
pub mod index;
pub mod keys;
pub mod kv;
pub mod migrations;
pub mod password;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use kv::{KvStore, WriteBatch};
pub use pool::{Store, StoreConfig};
pub use repository::auth::AuthRepository;
pub use repository::product::ProductRepository;
