//! # Storage Keys
//!
//! The fixed key namespace shared with the original mobile app.
//!
//! ## Key Layout
//! ```text
//! products:index  → ordered JSON array of product IDs
//! product:<id>    → one product record
//! allUsers        → JSON array of every user account
//! userToken       → active session token (JSON string)
//! userDetails     → denormalized details of the signed-in user
//! ```
//!
//! These strings are a wire contract: devices upgraded in place keep their
//! existing data only if the keys stay byte-identical.

/// Index key for the product collection.
pub const PRODUCTS_INDEX: &str = "products:index";

/// Key holding the full user list.
pub const USERS: &str = "allUsers";

/// Key holding the active session token.
pub const SESSION_TOKEN: &str = "userToken";

/// Key holding the denormalized signed-in user details.
pub const SESSION_DETAILS: &str = "userDetails";

/// Per-entity key for a product record.
pub fn product(id: &str) -> String {
    format!("product:{id}")
}
