//! Catalog-related types.
//!
//! The catalog itself is an external collaborator that hands the
//! session a list of product records; the core only holds references
//! to them and never mutates one.

use serde::{Deserialize, Serialize};

/// A product record from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier, unique within the catalog.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// Catalog category the product is filed under.
    #[serde(default)]
    pub category: String,
    /// Reference to the product image.
    #[serde(default)]
    pub image: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}
