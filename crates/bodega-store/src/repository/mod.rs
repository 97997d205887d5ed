//! # Repository Module
//!
//! Repository implementations over the key-value store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts storage access behind a clean API.   │
//! │                                                                         │
//! │  UI layer                                                               │
//! │       │                                                                 │
//! │       │  store.products().load_all()                                   │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── load_all / get_by_id                                               │
//! │  ├── add / update_by_id / delete_by_id                                  │
//! │  └── seed_if_needed / invalidate_cache                                  │
//! │       │                                                                 │
//! │       │  index + per-entity keys, batched writes                        │
//! │       ▼                                                                 │
//! │  KvStore (SQLite)                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Key layout and caching are isolated in one place                    │
//! │  • The UI never touches raw keys                                       │
//! │  • Isolated stores make tests trivial                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog CRUD with cache + seeding
//! - [`auth::AuthRepository`] - Accounts and the active session

pub mod auth;
pub mod product;
