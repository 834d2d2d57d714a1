//! Fixtures
//!
//! Store configuration loaded from YAML: the product catalog, the ordered
//! promotion list and sample scan lists.

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, InMemoryCatalog},
    checkout::Checkout,
    discounts::DiscountRule,
    fixtures::{items::ItemsFixture, products::ProductsFixture, promotions::PromotionsFixture},
    promotions::{Promotion, PromotionError},
};

pub mod items;
pub mod products;
pub mod promotions;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products or promotions
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Invalid promotion parameters
    #[error(transparent)]
    Promotion(#[from] PromotionError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog built from the loaded products
    catalog: Option<InMemoryCatalog>,

    /// Promotions, in application order
    promotions: Vec<Promotion>,

    /// SKUs in scan order
    items: Vec<String>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            promotions: Vec::new(),
            items: Vec::new(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for (sku, product_fixture) in fixture.products {
            let (item, currency) = product_fixture.try_into_item(sku)?;
            let expected = self.expect_currency(currency)?;

            self.catalog
                .get_or_insert_with(|| InMemoryCatalog::new(expected))
                .insert(item);
        }

        debug!(
            path = %file_path.display(),
            products = self.catalog.as_ref().map_or(0, InMemoryCatalog::len),
            "loaded products"
        );

        Ok(self)
    }

    /// Load promotions from a YAML fixture file, appending them in file order
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if a promotion is invalid.
    pub fn load_promotions(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("promotions")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let fixture: PromotionsFixture = serde_norway::from_str(&contents)?;

        for promotion_fixture in fixture.promotions {
            let (promotion, currency) = promotion_fixture.try_into_promotion(self.currency)?;

            if let Some(currency) = currency {
                self.expect_currency(currency)?;
            }

            self.promotions.push(promotion);
        }

        debug!(
            path = %file_path.display(),
            promotions = self.promotions.len(),
            "loaded promotions"
        );

        Ok(self)
    }

    /// Load a scan list from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if a SKU is not in the catalog.
    pub fn load_items(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("items").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ItemsFixture = serde_norway::from_str(&contents)?;

        let catalog = self.catalog()?;

        for sku in &fixture.items {
            catalog
                .lookup(sku)
                .map_err(|_err| FixtureError::ProductNotFound(sku.clone()))?;
        }

        self.items.extend(fixture.items);

        Ok(self)
    }

    /// Load a complete fixture set (products, promotions and items with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in(name, "./fixtures")
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(name: &str, base_path: impl Into<PathBuf>) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_products(name)?
            .load_promotions(name)?
            .load_items(name)?;

        Ok(fixture)
    }

    /// Get the catalog built from the loaded products
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCurrency`] if no products have been loaded.
    pub fn catalog(&self) -> Result<&InMemoryCatalog, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCurrency)
    }

    /// Get all promotions, in application order
    pub fn promotions(&self) -> &[Promotion] {
        &self.promotions
    }

    /// Get the scan list
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Create an empty checkout session over the loaded catalog and promotions
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCurrency`] if no products have been loaded.
    pub fn checkout(&self) -> Result<Checkout<InMemoryCatalog>, FixtureError> {
        let rules = self
            .promotions
            .iter()
            .cloned()
            .map(|promotion| Box::new(promotion) as Box<dyn DiscountRule>)
            .collect();

        Ok(Checkout::new(self.catalog()?.clone(), rules))
    }

    /// Record the fixture currency, or check `currency` against it.
    fn expect_currency(
        &mut self,
        currency: &'static Currency,
    ) -> Result<&'static Currency, FixtureError> {
        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(existing) => Ok(existing),
            None => {
                self.currency = Some(currency);
                Ok(currency)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use rusty_money::iso::EUR;
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    fn write_fixture(base: &Path, kind: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(kind);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    const PRODUCTS: &str = r#"
products:
  "1001":
    description: Handzeep Nivea
    group: Handzeep
    brand: Nivea
    price: 1.35 EUR
  "1002":
    description: Handzeep Dove
    group: Handzeep
    brand: Dove
    price: 1.55 EUR
"#;

    const PROMOTIONS: &str = r"
promotions:
  - type: group_second_free
    name: Nivea tweede gratis
    matcher:
      brand: Nivea
  - type: bundle_price
    name: Dove 3 voor 4 euro
    matcher:
      brand: Dove
    size: 3
    price: 4.00 EUR
";

    #[test]
    fn from_set_loads_catalog_promotions_and_items() -> TestResult {
        let dir = TempDir::new()?;
        write_fixture(dir.path(), "products", "till", PRODUCTS)?;
        write_fixture(dir.path(), "promotions", "till", PROMOTIONS)?;
        write_fixture(dir.path(), "items", "till", "items: [\"1001\", \"1002\"]\n")?;

        let fixture = Fixture::from_set_in("till", dir.path())?;

        assert_eq!(fixture.catalog()?.len(), 2);
        assert_eq!(fixture.catalog()?.currency(), EUR);
        assert_eq!(fixture.items(), ["1001".to_string(), "1002".to_string()]);

        let names: Vec<&str> = fixture.promotions().iter().map(|p| p.name()).collect();

        assert_eq!(names, vec!["Nivea tweede gratis", "Dove 3 voor 4 euro"]);

        Ok(())
    }

    #[test]
    fn checkout_uses_loaded_promotions() -> TestResult {
        let dir = TempDir::new()?;
        write_fixture(dir.path(), "products", "till", PRODUCTS)?;
        write_fixture(dir.path(), "promotions", "till", PROMOTIONS)?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_products("till")?.load_promotions("till")?;

        let mut checkout = fixture.checkout()?;

        for sku in ["1002", "1002", "1002", "1001", "1001"] {
            checkout.scan(sku)?;
        }

        // 3 x 155 for 400, plus one free Nivea.
        assert_eq!(checkout.total()?, 535);

        Ok(())
    }

    #[test]
    fn mixed_product_currencies_are_rejected() -> TestResult {
        let dir = TempDir::new()?;
        write_fixture(
            dir.path(),
            "products",
            "mixed",
            r#"
products:
  "1001":
    description: Handzeep Nivea
    group: Handzeep
    price: 1.35 EUR
  "1002":
    description: Handzeep Dove
    group: Handzeep
    price: 1.55 GBP
"#,
        )?;

        let result = Fixture::with_base_path(dir.path())
            .load_products("mixed")
            .map(|_| ());

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(..))));

        Ok(())
    }

    #[test]
    fn unknown_item_sku_is_rejected() -> TestResult {
        let dir = TempDir::new()?;
        write_fixture(dir.path(), "products", "till", PRODUCTS)?;
        write_fixture(dir.path(), "items", "till", "items: [\"9999\"]\n")?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_products("till")?;

        let result = fixture.load_items("till").map(|_| ());

        assert!(matches!(result, Err(FixtureError::ProductNotFound(sku)) if sku == "9999"));

        Ok(())
    }

    #[test]
    fn checkout_without_products_has_no_currency() {
        let fixture = Fixture::with_base_path("does-not-exist");

        assert!(matches!(fixture.checkout(), Err(FixtureError::NoCurrency)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = Fixture::with_base_path("does-not-exist")
            .load_products("none")
            .map(|_| ());

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }
}
