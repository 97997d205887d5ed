//! # Store Error Types
//!
//! Error types for the persistence layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error) / JSON Error (serde_json::Error)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UI layer ← Distinguishes I/O failures from domain failures            │
//! │       │       (NotFound / Conflict / InvalidCredentials / Validation)  │
//! │       ▼                                                                 │
//! │  User-facing message                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Taxonomy
//! - I/O failures: surfaced as-is, never retried here
//! - `NotFound`: referenced entity or session is absent
//! - `Conflict`: uniqueness violation (duplicate email)
//! - `InvalidCredentials`: sign-in rejected; deliberately does not say why
//! - `Validation`: malformed input caught before any write
//!
//! The only failures absorbed silently are corrupt reads and index IDs with
//! no backing record; both are logged and treated as absent.

use bodega_core::ValidationError;
use thiserror::Error;

/// Persistence layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity or session not found.
    ///
    /// ## When This Occurs
    /// - Updating or deleting an ID absent from the collection
    /// - Editing the profile with no active session
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Uniqueness violation.
    ///
    /// ## When This Occurs
    /// - Signing up with an email that already has an account
    /// - Changing the profile email to another account's address
    #[error("Duplicate {field}: '{value}' already exists")]
    Conflict { field: String, value: String },

    /// Sign-in rejected.
    ///
    /// One variant for both "no such email" and "wrong password" so the
    /// error message cannot be used to probe which accounts exist.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Input validation failure (from bodega-core, before any write).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Value could not be serialized for storage.
    ///
    /// Raised on the write path only. On the read path corrupt JSON is
    /// logged and treated as absent instead.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Storage connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal storage error.
    #[error("Internal storage error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Conflict error.
    pub fn conflict(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Conflict {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True when the error is a domain failure the UI should explain
    /// (as opposed to an I/O failure it can only apologize for).
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound { .. }
                | StoreError::Conflict { .. }
                | StoreError::InvalidCredentials
                | StoreError::Validation(_)
        )
    }
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → StoreError::NotFound
/// sqlx::Error::Database       → StoreError::QueryFailed
/// sqlx::Error::PoolTimedOut   → StoreError::PoolExhausted
/// Other                       → StoreError::Internal
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),

            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,

            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),

            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
