//! # Validation Module
//!
//! Input validation rules for Bodega.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend forms (TypeScript)                                  │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust)                                           │
//! │  ├── Same rules re-checked before any write                            │
//! │  └── The store layer never persists invalid input                      │
//! │                                                                         │
//! │  Defense in depth: the frontend can be bypassed, this module cannot.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rules mirror the frontend form schemas field for field, so a payload
//! that passes here renders cleanly everywhere in the app.

use crate::error::{ValidationError, ValidationResult};
use crate::types::{ProductDraft, ProductPatch, ProfileUpdate, SignUpForm};

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - 2 to 100 characters
/// - Letters, digits, and spaces only
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    if name.chars().count() < 2 {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: 2,
        });
    }
    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }
    if !name.chars().all(|c| c.is_alphanumeric() || c == ' ') {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: "must contain only letters, numbers, and spaces".to_string(),
        });
    }

    Ok(())
}

/// Validates a product description (required, at most 500 characters).
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }
    if description.chars().count() > 500 {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: 500,
        });
    }
    Ok(())
}

/// Validates a product price (finite and strictly positive).
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a vendor name (required, at most 50 characters).
pub fn validate_vendor(vendor: &str) -> ValidationResult<()> {
    if vendor.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "vendor".to_string(),
        });
    }
    if vendor.chars().count() > 50 {
        return Err(ValidationError::TooLong {
            field: "vendor".to_string(),
            max: 50,
        });
    }
    Ok(())
}

/// Validates the product image reference (required).
pub fn validate_image_url(image_url: &str) -> ValidationResult<()> {
    if image_url.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "imageUrl".to_string(),
        });
    }
    Ok(())
}

/// Validates a full product draft before it is persisted.
///
/// Stock needs no check: the `u32` type already rules out negatives.
pub fn validate_product_draft(draft: &ProductDraft) -> ValidationResult<()> {
    validate_product_name(&draft.name)?;
    validate_description(&draft.description)?;
    validate_price(draft.price)?;
    validate_vendor(&draft.vendor)?;
    validate_image_url(&draft.image_url)?;
    Ok(())
}

/// Validates the fields a patch actually carries.
///
/// Absent fields are untouched and therefore already valid.
pub fn validate_product_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_product_name(name)?;
    }
    if let Some(description) = &patch.description {
        validate_description(description)?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    if let Some(vendor) = &patch.vendor {
        validate_vendor(vendor)?;
    }
    if let Some(image_url) = &patch.image_url {
        validate_image_url(image_url)?;
    }
    Ok(())
}

// =============================================================================
// Account Validators
// =============================================================================

/// Normalizes an email for storage and comparison: trim + lowercase.
///
/// Uniqueness checks are always performed on the normalized form so
/// `Ada@Example.com` and `ada@example.com` are the same account.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates an email address shape.
///
/// Deliberately loose (one `@`, non-empty local part, a dot in the domain):
/// real validation happens when mail is actually delivered.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be a valid email address".to_string(),
        });
    }

    Ok(())
}

/// Validates a display name (required, at least 3 characters).
pub fn validate_user_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    if name.chars().count() < 3 {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: 3,
        });
    }
    Ok(())
}

/// Validates a password.
///
/// ## Rules
/// - At least 6 characters
/// - At least one uppercase letter
/// - At least one digit
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    if password.chars().count() < 6 {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        });
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(ValidationError::InvalidFormat {
            field: "password".to_string(),
            reason: "must contain an uppercase letter".to_string(),
        });
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "password".to_string(),
            reason: "must contain a digit".to_string(),
        });
    }
    Ok(())
}

/// Validates a complete sign-up form, including password confirmation.
pub fn validate_sign_up(form: &SignUpForm) -> ValidationResult<()> {
    validate_user_name(&form.name)?;
    validate_email(&form.email)?;
    validate_password(&form.password)?;

    if form.confirm_password.is_empty() {
        return Err(ValidationError::Required {
            field: "confirmPassword".to_string(),
        });
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::Mismatch {
            field: "confirmPassword".to_string(),
        });
    }

    Ok(())
}

/// Validates a profile edit payload.
pub fn validate_profile_update(update: &ProfileUpdate) -> ValidationResult<()> {
    validate_user_name(&update.name)?;
    validate_email(&update.email)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductCategory;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Field Notebook".to_string(),
            description: "Pocket sized dot grid notebook".to_string(),
            price: 7.5,
            stock: 40,
            category: ProductCategory::Books,
            vendor: "Papier".to_string(),
            image_url: "https://img.example.com/notebook.jpg".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_product_draft(&draft()).is_ok());
    }

    #[test]
    fn test_product_name_rules() {
        assert!(validate_product_name("Coffee Mug 330").is_ok());
        assert!(matches!(
            validate_product_name("  "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_product_name("A"),
            Err(ValidationError::TooShort { .. })
        ));
        assert!(matches!(
            validate_product_name("Mug <script>"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_product_name(&"x".repeat(101)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_price_must_be_positive_and_finite() {
        assert!(validate_price(0.01).is_ok());
        assert!(validate_price(0.0).is_err());
        assert!(validate_price(-3.5).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_patch_only_checks_present_fields() {
        // A patch without a name must not trip the name validator.
        let patch = ProductPatch {
            price: Some(12.5),
            ..ProductPatch::default()
        };
        assert!(validate_product_patch(&patch).is_ok());

        let bad = ProductPatch {
            price: Some(-1.0),
            ..ProductPatch::default()
        };
        assert!(bad.price.is_some());
        assert!(validate_product_patch(&bad).is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("  ada@example.com  ").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("ada").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@localhost").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("Secret1").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("alllowercase1").is_err());
        assert!(validate_password("NoDigitsHere").is_err());
    }

    #[test]
    fn test_sign_up_confirmation_must_match() {
        let mut form = SignUpForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "Secret1".to_string(),
            confirm_password: "Secret1".to_string(),
        };
        assert!(validate_sign_up(&form).is_ok());

        form.confirm_password = "Secret2".to_string();
        assert!(matches!(
            validate_sign_up(&form),
            Err(ValidationError::Mismatch { .. })
        ));
    }
}
