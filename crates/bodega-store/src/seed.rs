//! # Fixture Dataset
//!
//! The bundled catalog used to populate a brand-new install.
//!
//! The fixture ships as JSON (`assets/products.json`) rather than Rust
//! literals so it stays byte-comparable with the dataset the mobile app
//! bundles, and parsing it exercises the exact wire shape.

use bodega_core::Product;

use crate::error::StoreResult;

/// Raw fixture JSON, embedded at compile time.
const FIXTURE_JSON: &str = include_str!("../assets/products.json");

/// Parses the bundled fixture catalog.
///
/// A parse failure here is a packaging bug, but it is still surfaced as an
/// error rather than a panic so a broken build can't take the app down at
/// first launch.
pub fn fixture_products() -> StoreResult<Vec<Product>> {
    Ok(serde_json::from_str(FIXTURE_JSON)?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bodega_core::validation::validate_product_draft;
    use bodega_core::ProductDraft;

    #[test]
    fn test_fixture_parses() {
        let products = fixture_products().unwrap();
        assert_eq!(products.len(), 3);
    }

    #[test]
    fn test_fixture_ids_are_unique() {
        let products = fixture_products().unwrap();
        let mut ids: Vec<_> = products.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_fixture_passes_validation() {
        // Everything we seed must also be valid by the add() rules.
        for product in fixture_products().unwrap() {
            let draft = ProductDraft {
                name: product.name.clone(),
                description: product.description.clone(),
                price: product.price,
                stock: product.stock,
                category: product.category,
                vendor: product.vendor.clone(),
                image_url: product.image_url.clone(),
                is_active: product.is_active,
            };
            validate_product_draft(&draft).unwrap();
        }
    }
}
