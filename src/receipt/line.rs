//! Receipt Lines

use std::cmp::Ordering;

use crate::{discounts::DiscountError, items::Item};

/// One scanned item and the price currently charged for it.
///
/// The effective price starts at the catalog price and can only be lowered by
/// discount rules, never below zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    item: Item,
    price: i64,
    position: usize,
}

impl ReceiptLine {
    /// Create a line for an item scanned at `position` (0-based scan order).
    #[must_use]
    pub fn new(item: Item, position: usize) -> Self {
        let price = item.price();

        Self {
            item,
            price,
            position,
        }
    }

    /// The scanned item.
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Effective price in minor units.
    pub fn price(&self) -> i64 {
        self.price
    }

    /// Position of the line in scan order.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether a rule lowered the price of this line.
    pub fn is_discounted(&self) -> bool {
        self.price < self.item.price()
    }

    /// Difference between the catalog price and the effective price.
    pub fn savings(&self) -> i64 {
        self.item.price() - self.price
    }

    /// Set the effective price.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::InvalidDiscount`] if `price` is negative or above
    /// the catalog price. The line is left unchanged.
    pub fn set_price(&mut self, price: i64) -> Result<(), DiscountError> {
        if price < 0 || price > self.item.price() {
            return Err(DiscountError::InvalidDiscount {
                sku: self.item.sku().to_string(),
                attempted: price,
                max: self.item.price(),
            });
        }

        self.price = price;

        Ok(())
    }

    /// Restore the catalog price.
    pub fn reset_price(&mut self) {
        self.price = self.item.price();
    }
}

impl PartialOrd for ReceiptLine {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReceiptLine {
    /// Cheapest first; scan order breaks ties.
    fn cmp(&self, other: &Self) -> Ordering {
        self.price
            .cmp(&other.price)
            .then_with(|| self.position.cmp(&other.position))
    }
}
