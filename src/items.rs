//! Items

/// A catalog item, as resolved from a scanned SKU.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    sku: String,
    group: String,
    brand: String,
    description: String,
    price: i64,
}

impl Item {
    /// Creates a new item. `price` is in minor units.
    pub fn new(
        sku: impl Into<String>,
        group: impl Into<String>,
        brand: impl Into<String>,
        description: impl Into<String>,
        price: i64,
    ) -> Self {
        Self {
            sku: sku.into(),
            group: group.into(),
            brand: brand.into(),
            description: description.into(),
            price,
        }
    }

    /// Returns the scan identifier of the item
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Returns the article group of the item
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Returns the brand of the item
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Returns the description printed on the receipt
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the catalog price of the item in minor units
    pub fn price(&self) -> i64 {
        self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_constructor_values() {
        let item = Item::new("2001", "Jam", "De Betuwe", "Aardbeien Jam", 135);

        assert_eq!(item.sku(), "2001");
        assert_eq!(item.group(), "Jam");
        assert_eq!(item.brand(), "De Betuwe");
        assert_eq!(item.description(), "Aardbeien Jam");
        assert_eq!(item.price(), 135);
    }
}
