//! Catalog
//!
//! The lookup capability the checkout depends on to resolve scanned SKUs.

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::items::Item;

/// Errors reported by a catalog lookup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No item is registered under the scanned SKU.
    #[error("SKU {0} not found in catalog")]
    NotFound(String),

    /// The catalog returned an item with a negative price.
    #[error("SKU {sku} has a negative catalog price: {price}")]
    InvalidPrice {
        /// Scanned SKU
        sku: String,
        /// Price reported by the catalog
        price: i64,
    },
}

/// Resolves scan identifiers to items.
///
/// A catalog prices everything in a single currency. Implementations that are
/// backed by I/O own their retry policy; the checkout calls `lookup` once per scan.
pub trait Catalog {
    /// Look up the item registered under `sku`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the SKU is unknown.
    fn lookup(&self, sku: &str) -> Result<Item, CatalogError>;

    /// Currency all catalog prices are expressed in.
    fn currency(&self) -> &'static Currency;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn lookup(&self, sku: &str) -> Result<Item, CatalogError> {
        (**self).lookup(sku)
    }

    fn currency(&self) -> &'static Currency {
        (**self).currency()
    }
}

/// Catalog held in memory, keyed by SKU.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    items: FxHashMap<String, Item>,
    currency: &'static Currency,
}

impl InMemoryCatalog {
    /// Create an empty catalog for the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            items: FxHashMap::default(),
            currency,
        }
    }

    /// Create a catalog from a list of items. Later entries win on duplicate SKUs.
    pub fn with_items(items: impl IntoIterator<Item = Item>, currency: &'static Currency) -> Self {
        let mut catalog = Self::new(currency);

        for item in items {
            catalog.insert(item);
        }

        catalog
    }

    /// Register an item, returning the item it replaced, if any.
    pub fn insert(&mut self, item: Item) -> Option<Item> {
        self.items.insert(item.sku().to_string(), item)
    }

    /// Iterate over the registered items (in no particular order).
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Number of registered items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Catalog for InMemoryCatalog {
    fn lookup(&self, sku: &str) -> Result<Item, CatalogError> {
        self.items
            .get(sku)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(sku.to_string()))
    }

    fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;
    use testresult::TestResult;

    use crate::checkout::Checkout;

    use super::*;

    fn test_items() -> [Item; 2] {
        [
            Item::new("1001", "Handzeep", "Nivea", "Handzeep Nivea", 135),
            Item::new("1002", "Handzeep", "Dove", "Handzeep Dove", 155),
        ]
    }

    #[test]
    fn lookup_returns_registered_item() -> TestResult {
        let catalog = InMemoryCatalog::with_items(test_items(), EUR);

        let item = catalog.lookup("1002")?;

        assert_eq!(item.brand(), "Dove");
        assert_eq!(item.price(), 155);

        Ok(())
    }

    #[test]
    fn lookup_unknown_sku_is_not_found() {
        let catalog = InMemoryCatalog::with_items(test_items(), EUR);

        assert_eq!(
            catalog.lookup("nonexistent"),
            Err(CatalogError::NotFound("nonexistent".to_string()))
        );
    }

    #[test]
    fn insert_replaces_existing_sku() {
        let mut catalog = InMemoryCatalog::with_items(test_items(), EUR);

        let replaced = catalog.insert(Item::new("1001", "Handzeep", "Nivea", "Handzeep", 99));

        assert_eq!(replaced.map(|item| item.price()), Some(135));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn new_catalog_is_empty() {
        let catalog = InMemoryCatalog::new(EUR);

        assert!(catalog.is_empty());
        assert_eq!(catalog.currency(), EUR);
        assert_eq!(catalog.iter().count(), 0);
    }

    #[test]
    fn negative_catalog_price_is_refused_on_scan() -> TestResult {
        let catalog = InMemoryCatalog::with_items(
            [
                Item::new("1001", "Handzeep", "Nivea", "Handzeep Nivea", 135),
                Item::new("9001", "Statiegeld", "", "Statiegeld retour", -50),
            ],
            EUR,
        );
        let mut checkout = Checkout::new(catalog, vec![]);

        checkout.scan("1001")?;

        assert_eq!(
            checkout.scan("9001"),
            Err(CatalogError::InvalidPrice {
                sku: "9001".to_string(),
                price: -50,
            })
        );
        assert_eq!(checkout.len(), 1);
        assert!(checkout.lines().iter().all(|line| line.price() >= 0));
        assert_eq!(checkout.total()?, 135);

        Ok(())
    }

    #[test]
    fn reference_delegates_to_catalog() -> TestResult {
        let catalog = InMemoryCatalog::with_items(test_items(), EUR);
        let by_ref = &catalog;

        assert_eq!(Catalog::lookup(&by_ref, "1001")?.brand(), "Nivea");
        assert_eq!(Catalog::currency(&by_ref), EUR);

        Ok(())
    }
}
