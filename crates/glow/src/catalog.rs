//! The catalog data source.
//!
//! Reads the product list from a JSON file shaped like
//! `{"products": [...]}`. The whole catalog is assumed to fit in
//! memory; there is no pagination.

use std::fs;
use std::io;
use std::path::Path;

use glow_core::catalog::Product;
use serde::Deserialize;

#[derive(Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// Loads all product records from the given catalog file.
pub fn load_products(path: impl AsRef<Path>) -> io::Result<Vec<Product>> {
    let raw = fs::read_to_string(path)?;
    let catalog: CatalogFile = serde_json::from_str(&raw)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok(catalog.products)
}

/// Returns the distinct categories of the given products, in first-seen
/// order.
pub fn categories(products: &[Product]) -> Vec<&str> {
    let mut categories: Vec<&str> = Vec::new();
    for product in products {
        if !categories.contains(&product.category.as_str()) {
            categories.push(&product.category);
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_products() {
        let dir = std::env::temp_dir().join("glow-catalog-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("products.json");
        fs::write(
            &path,
            r#"{
                "products": [
                    {
                        "id": 1,
                        "name": "Foam Cleanser",
                        "brand": "Acme",
                        "category": "cleanser",
                        "image": "img/1.png",
                        "description": "A gentle foaming cleanser."
                    },
                    {
                        "id": 2,
                        "name": "Daily Toner",
                        "brand": "Glow Labs",
                        "category": "toner",
                        "image": "img/2.png",
                        "description": "Balances after cleansing."
                    }
                ]
            }"#,
        )
        .unwrap();

        let products = load_products(&path).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[1].brand, "Glow Labs");
        assert_eq!(categories(&products), vec!["cleanser", "toner"]);
    }

    #[test]
    fn test_load_products_rejects_bad_shape() {
        let dir = std::env::temp_dir().join("glow-catalog-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        fs::write(&path, r#"{"items": []}"#).unwrap();

        assert!(load_products(&path).is_err());
    }
}
