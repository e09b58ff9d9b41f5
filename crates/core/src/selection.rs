use std::sync::Arc;

use crate::catalog::Product;
use crate::storage::{SELECTION_KEY, Storage};

/// The user's current product selection.
///
/// An ordered sequence with uniqueness enforced by product identifier:
/// membership, insertion and removal are defined purely by `id`
/// equality. Every mutation is written through to storage as the full
/// denormalized product list, so the view can render the selection
/// panel without re-querying the catalog.
pub struct SelectionStore {
    products: Vec<Product>,
    storage: Arc<dyn Storage>,
}

impl SelectionStore {
    /// Creates an empty store backed by the given storage.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            products: Vec::new(),
            storage,
        }
    }

    /// Replaces the in-memory selection with the persisted one, if any.
    ///
    /// Fails open: a missing blob or one that doesn't parse leaves the
    /// selection empty and never surfaces an error to the caller.
    pub fn restore(&mut self) {
        let blob = match self.storage.read(SELECTION_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return,
            Err(err) => {
                warn!("failed to read persisted selection: {err}");
                return;
            }
        };
        match serde_json::from_str::<Vec<Product>>(&blob) {
            Ok(products) => self.products = products,
            Err(err) => {
                warn!("discarding unparsable persisted selection: {err}");
            }
        }
    }

    /// Adds the product if its `id` is absent, removes it otherwise.
    ///
    /// Always succeeds, and returns the new selection contents.
    pub fn toggle(&mut self, product: Product) -> &[Product] {
        let index = self.products.iter().position(|p| p.id == product.id);
        match index {
            Some(index) => {
                self.products.remove(index);
            }
            None => self.products.push(product),
        }
        self.persist();
        &self.products
    }

    /// Returns the selection in insertion order.
    #[inline]
    pub fn current(&self) -> &[Product] {
        &self.products
    }

    /// Returns whether a product with the given `id` is selected.
    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.products.iter().any(|p| p.id == id)
    }

    fn persist(&self) {
        let blob = match serde_json::to_string(&self.products) {
            Ok(blob) => blob,
            Err(err) => {
                error!("failed to serialize selection: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.write(SELECTION_KEY, &blob) {
            // Dropped writes are not surfaced; the in-memory selection
            // stays authoritative for this session.
            warn!("failed to persist selection: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn product(id: u32, name: &str) -> Product {
        Product {
            id,
            name: name.to_owned(),
            brand: "Acme".to_owned(),
            category: "cleanser".to_owned(),
            image: format!("img/{id}.png"),
            description: String::new(),
        }
    }

    #[test]
    fn test_toggle_involution() {
        let mut store = SelectionStore::new(Arc::new(MemoryStorage::default()));
        store.toggle(product(1, "Foam"));
        store.toggle(product(2, "Toner"));
        let before = store.current().to_vec();

        store.toggle(product(3, "Serum"));
        store.toggle(product(3, "Serum"));
        assert_eq!(store.current(), &before[..]);
    }

    #[test]
    fn test_no_duplicate_ids() {
        let mut store = SelectionStore::new(Arc::new(MemoryStorage::default()));
        for id in [1, 2, 1, 3, 2, 2, 1, 1] {
            store.toggle(product(id, "P"));
            let mut ids: Vec<_> = store.current().iter().map(|p| p.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), store.current().len());
        }
    }

    #[test]
    fn test_membership_by_id_only() {
        let mut store = SelectionStore::new(Arc::new(MemoryStorage::default()));
        store.toggle(product(1, "Foam"));
        // A record with the same id but different fields still matches.
        store.toggle(product(1, "Renamed"));
        assert!(store.current().is_empty());
    }

    #[test]
    fn test_restore_from_persisted_blob() {
        let storage = Arc::new(MemoryStorage::default());
        storage
            .write(
                SELECTION_KEY,
                r#"[{"id":1,"name":"X","brand":"Y","image":"i","description":"d"}]"#,
            )
            .unwrap();

        let mut store = SelectionStore::new(storage);
        store.restore();
        assert_eq!(store.current().len(), 1);
        assert!(store.contains(1));
        assert_eq!(store.current()[0].name, "X");
        assert_eq!(store.current()[0].brand, "Y");
    }

    #[test]
    fn test_restore_fails_open() {
        let storage = Arc::new(MemoryStorage::default());
        storage.write(SELECTION_KEY, "certainly not json").unwrap();

        let mut store = SelectionStore::new(storage);
        store.restore();
        assert!(store.current().is_empty());
    }

    #[test]
    fn test_mutations_are_persisted() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = SelectionStore::new(Arc::clone(&storage) as Arc<dyn Storage>);
        store.toggle(product(7, "Mask"));

        let blob = storage.read(SELECTION_KEY).unwrap().unwrap();
        let persisted: Vec<Product> = serde_json::from_str(&blob).unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].id, 7);
    }
}
