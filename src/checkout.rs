//! Checkout
//!
//! A till session: scanned lines accumulate in scan order, and the payable
//! total is recomputed from scratch by running the configured discount rules.

use rusty_money::iso::Currency;
use tracing::{debug, info, warn};

use crate::{
    catalog::{Catalog, CatalogError},
    discounts::{DiscountError, DiscountRule},
    observer::{CheckoutObserver, NoopObserver},
    receipt::{Receipt, line::ReceiptLine},
};

/// A single checkout session.
///
/// Sessions are not shared between tills; callers serialise access.
#[derive(Debug)]
pub struct Checkout<C: Catalog> {
    catalog: C,
    rules: Vec<Box<dyn DiscountRule>>,
    lines: Vec<ReceiptLine>,
    discount: i64,
}

impl<C: Catalog> Checkout<C> {
    /// Create an empty session. Rules run in the order given.
    pub fn new(catalog: C, rules: Vec<Box<dyn DiscountRule>>) -> Self {
        Self {
            catalog,
            rules,
            lines: Vec::new(),
            discount: 0,
        }
    }

    /// Append a rule after the ones already configured.
    #[must_use]
    pub fn with_rule(mut self, rule: impl DiscountRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Scan an item.
    ///
    /// # Errors
    ///
    /// Returns the catalog's [`CatalogError`] if the SKU cannot be resolved; no
    /// line is added in that case.
    pub fn scan(&mut self, sku: &str) -> Result<(), CatalogError> {
        self.scan_with_observer(sku, &mut NoopObserver)
    }

    /// Scan an item, notifying `observer` of the new line.
    ///
    /// # Errors
    ///
    /// Returns the catalog's [`CatalogError`] if the SKU cannot be resolved, or
    /// [`CatalogError::InvalidPrice`] if its price is negative; no line is added
    /// in either case.
    #[tracing::instrument(skip(self, observer))]
    pub fn scan_with_observer(
        &mut self,
        sku: &str,
        observer: &mut dyn CheckoutObserver,
    ) -> Result<(), CatalogError> {
        let item = self
            .catalog
            .lookup(sku)
            .inspect_err(|err| warn!(%err, "catalog lookup failed"))?;

        if item.price() < 0 {
            warn!(price = item.price(), "catalog price is negative");

            return Err(CatalogError::InvalidPrice {
                sku: sku.to_string(),
                price: item.price(),
            });
        }

        let line = ReceiptLine::new(item, self.lines.len());

        debug!(
            position = line.position(),
            price = line.price(),
            description = line.item().description(),
            "scanned line"
        );

        observer.on_scan(&line);

        self.lines.push(line);

        Ok(())
    }

    /// Calculate the payable total in minor units.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if a rule sets an invalid line price or
    /// reports a negative flat amount.
    pub fn total(&mut self) -> Result<i64, DiscountError> {
        self.total_with_observer(&mut NoopObserver)
    }

    /// Calculate the payable total, notifying `observer` of each rule outcome.
    ///
    /// Every line is reset to its catalog price and the flat discount is cleared
    /// before the rules run, so repeated calls give the same result.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if a rule sets an invalid line price or
    /// reports a negative flat amount. Lines are back at their catalog prices
    /// and the flat discount is zero after a failed calculation.
    #[tracing::instrument(skip_all, fields(lines = self.lines.len(), rules = self.rules.len()))]
    pub fn total_with_observer(
        &mut self,
        observer: &mut dyn CheckoutObserver,
    ) -> Result<i64, DiscountError> {
        self.reset();

        let result = self.apply_rules(observer);

        if result.is_err() {
            self.reset();
        }

        result
    }

    /// Restore catalog prices and clear the flat discount.
    fn reset(&mut self) {
        for line in &mut self.lines {
            line.reset_price();
        }

        self.discount = 0;
    }

    fn apply_rules(&mut self, observer: &mut dyn CheckoutObserver) -> Result<i64, DiscountError> {
        let mut discount = 0_i64;

        for rule in &self.rules {
            let outcome = rule.apply(&mut self.lines)?;

            if outcome.amount() < 0 {
                return Err(DiscountError::NegativeAmount {
                    rule: rule.name().to_string(),
                    amount: outcome.amount(),
                });
            }

            debug!(
                rule = rule.name(),
                amount = outcome.amount(),
                adjusted = outcome.adjusted_lines().len(),
                "applied rule"
            );

            observer.on_rule_applied(rule.name(), &outcome);

            discount = discount.saturating_add(outcome.amount());
        }

        self.discount = discount;

        let lines_total = self
            .lines
            .iter()
            .map(ReceiptLine::price)
            .fold(0_i64, i64::saturating_add);
        let mut total = lines_total.saturating_sub(discount);

        if total < 0 {
            warn!(lines_total, discount, "flat discounts exceed line total");
            total = 0;
        }

        observer.on_total(total);

        Ok(total)
    }

    /// End the session and hand over the receipt.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the final total cannot be calculated.
    pub fn finalize(mut self) -> Result<Receipt, DiscountError> {
        let total = self.total()?;
        let subtotal = self.subtotal();

        info!(
            lines = self.lines.len(),
            subtotal,
            total,
            "finalized checkout"
        );

        Ok(Receipt::new(
            self.lines,
            subtotal,
            self.discount,
            total,
            self.catalog.currency(),
        ))
    }

    /// Sum of catalog prices, before any discount.
    pub fn subtotal(&self) -> i64 {
        self.lines
            .iter()
            .map(|line| line.item().price())
            .fold(0, i64::saturating_add)
    }

    /// Flat discount accumulated by the last total calculation.
    pub fn discount(&self) -> i64 {
        self.discount
    }

    /// Lines in scan order.
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Number of scanned lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if nothing has been scanned.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Configured rules, in application order.
    pub fn rules(&self) -> &[Box<dyn DiscountRule>] {
        &self.rules
    }

    /// Currency the session is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.catalog.currency()
    }

    /// The catalog used to resolve scans.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }
}
