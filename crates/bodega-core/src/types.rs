//! # Domain Types
//!
//! Core domain types used throughout Bodega.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      User       │   │    Session      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  token          │       │
//! │  │  name, price    │   │  name, email    │   │  user (denorm.) │       │
//! │  │  stock, vendor  │   │  hashedPassword │   └─────────────────┘       │
//! │  │  category       │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductDraft   │   │  ProductPatch   │   │   SignUpForm    │       │
//! │  │  (add payload,  │   │  (typed partial │   │   Credentials   │       │
//! │  │   no id)        │   │   update)       │   │   ProfileUpdate │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Compatibility
//! Every persisted type serializes to camelCase JSON, byte-compatible with
//! what the mobile frontend already stores on devices (`imageUrl`,
//! `isActive`, `hashedPassword`). Changing a field name here is a breaking
//! change for existing installs.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product Category
// =============================================================================

/// Catalog category for a product.
///
/// Serialized as the display strings the frontend renders, so the stored
/// JSON doubles as the UI label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ProductCategory {
    Electronics,
    Clothing,
    #[serde(rename = "Home Appliances")]
    HomeAppliances,
    Books,
    Sports,
    Food,
    Beauty,
    Toys,
    Automotive,
    Health,
    Furniture,
    Other,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// ## Invariants
/// - `id` is immutable once assigned (never overwritten by a patch)
/// - every Product referenced by the collection index has a stored record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4), generated at creation time.
    pub id: String,

    /// Display name shown in the catalog.
    pub name: String,

    /// Longer description for the detail screen.
    pub description: String,

    /// Unit price. Positive.
    pub price: f64,

    /// Units on hand. Non-negative by construction.
    pub stock: u32,

    /// Catalog category.
    pub category: ProductCategory,

    /// Vendor / brand name.
    pub vendor: String,

    /// URI of the product image.
    pub image_url: String,

    /// Whether the product is visible in the catalog.
    pub is_active: bool,
}

/// Payload for creating a product: a [`Product`] minus the `id`.
///
/// The repository generates the id and builds the full entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub category: ProductCategory,
    pub vendor: String,
    pub image_url: String,
    pub is_active: bool,
}

impl ProductDraft {
    /// Builds the full entity from this draft and a freshly generated id.
    pub fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category: self.category,
            vendor: self.vendor,
            image_url: self.image_url,
            is_active: self.is_active,
        }
    }
}

/// Typed partial update for a product.
///
/// ## Why Not a Loose JSON Object?
/// The original duck-typed "spread a partial object over the record" update
/// could smuggle in arbitrary fields (including `id`). This struct lists
/// exactly the mutable fields; unknown fields are rejected at the serde
/// boundary and `id` simply is not present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ProductPatch {
    /// Returns true when the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category.is_none()
            && self.vendor.is_none()
            && self.image_url.is_none()
            && self.is_active.is_none()
    }

    /// Merges this patch over an existing product.
    ///
    /// The `id` of `base` is preserved unconditionally.
    pub fn apply_to(&self, base: &Product) -> Product {
        Product {
            id: base.id.clone(),
            name: self.name.clone().unwrap_or_else(|| base.name.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| base.description.clone()),
            price: self.price.unwrap_or(base.price),
            stock: self.stock.unwrap_or(base.stock),
            category: self.category.unwrap_or(base.category),
            vendor: self.vendor.clone().unwrap_or_else(|| base.vendor.clone()),
            image_url: self
                .image_url
                .clone()
                .unwrap_or_else(|| base.image_url.clone()),
            is_active: self.is_active.unwrap_or(base.is_active),
        }
    }
}

// =============================================================================
// User & Session
// =============================================================================

/// A registered user account.
///
/// `hashed_password` is an Argon2 PHC string, never the plaintext.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Normalized (trimmed, lowercased) email. Unique across accounts.
    pub email: String,

    /// Salted Argon2 hash of the password (PHC string format).
    pub hashed_password: String,
}

/// Denormalized details of the signed-in user, stored alongside the token.
///
/// Kept separate from [`User`] so the session record never carries the
/// password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        SessionUser {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// The active session: token plus denormalized user details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Session {
    /// Cryptographically random session token (hex).
    pub token: String,

    /// Denormalized details of the signed-in user.
    pub user: SessionUser,
}

// =============================================================================
// Auth Forms
// =============================================================================

/// Sign-up form payload.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Sign-in credentials.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Profile edit payload (name + email only; passwords have their own flow).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: "1001".to_string(),
            name: "Espresso Grinder".to_string(),
            description: "Conical burr grinder with 40 settings".to_string(),
            price: 89.99,
            stock: 12,
            category: ProductCategory::HomeAppliances,
            vendor: "Brewline".to_string(),
            image_url: "https://img.example.com/grinder.jpg".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn test_product_serializes_to_frontend_shape() {
        let json = serde_json::to_value(sample_product()).unwrap();

        // Field names must match what the mobile app already persisted.
        assert_eq!(json["imageUrl"], "https://img.example.com/grinder.jpg");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["category"], "Home Appliances");
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn test_product_reads_stored_frontend_json() {
        // Captured from a device running the original app.
        let raw = r#"{
            "id": "1716891321000",
            "name": "Trail Shoes",
            "description": "Lightweight trail running shoes",
            "price": 59.5,
            "stock": 3,
            "category": "Sports",
            "vendor": "Northpeak",
            "imageUrl": "file:///photos/shoes.jpg",
            "isActive": false
        }"#;

        let product: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(product.id, "1716891321000");
        assert_eq!(product.category, ProductCategory::Sports);
        assert_eq!(product.price, 59.5);
        assert!(!product.is_active);
    }

    #[test]
    fn test_user_serializes_hashed_password_field() {
        let user = User {
            id: "u-1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            hashed_password: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("hashedPassword").is_some());
        assert!(json.get("hashed_password").is_none());
    }

    #[test]
    fn test_patch_rejects_unknown_fields() {
        // `id` is not a patchable field; neither is anything misspelled.
        let err = serde_json::from_str::<ProductPatch>(r#"{"id": "evil"}"#);
        assert!(err.is_err());

        let err = serde_json::from_str::<ProductPatch>(r#"{"pricee": 3.5}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_patch_preserves_id_and_unset_fields() {
        let base = sample_product();
        let patch = ProductPatch {
            price: Some(99.5),
            stock: Some(0),
            ..ProductPatch::default()
        };

        let merged = patch.apply_to(&base);
        assert_eq!(merged.id, base.id);
        assert_eq!(merged.price, 99.5);
        assert_eq!(merged.stock, 0);
        assert_eq!(merged.name, base.name);
        assert_eq!(merged.category, base.category);
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let base = sample_product();
        let patch = ProductPatch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.apply_to(&base), base);
    }

    #[test]
    fn test_session_user_drops_password_hash() {
        let user = User {
            id: "u-1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            hashed_password: "$argon2id$...".to_string(),
        };
        let details = SessionUser::from(&user);
        let json = serde_json::to_value(&details).unwrap();
        assert!(json.get("hashedPassword").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }
}
