//! # bodega-core: Pure Domain Logic for Bodega
//!
//! This crate is the **heart** of Bodega. It contains the catalog and account
//! domain types plus their validation rules, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Bodega Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Mobile Frontend (TypeScript)                  │   │
//! │  │    Catalog UI ──► Product Forms ──► Auth Screens ──► Profile    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ generated TS bindings                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bodega-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐   ┌───────────┐   ┌───────────┐                │   │
//! │  │   │   types   │   │ validation│   │   error   │                │   │
//! │  │   │  Product  │   │   rules   │   │ Validation│                │   │
//! │  │   │   User    │   │  checks   │   │   Error   │                │   │
//! │  │   └───────────┘   └───────────┘   └───────────┘                │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  bodega-store (Persistence Layer)                │   │
//! │  │        SQLite key-value store, index, caches, repositories      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, User, Session, patches, forms)
//! - [`error`] - Validation error type
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Stable Wire Shape**: All types serialize to the camelCase JSON the
//!    mobile frontend already stores on devices
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bodega_core::Product` instead of
// `use bodega_core::types::Product`

pub use error::ValidationError;
pub use types::*;
