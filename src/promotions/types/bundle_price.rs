//! Bundle Price
//!
//! Fixed price for a bundle of matching items ("three for four euro"). The
//! reduction is reported as a flat amount; line prices are left alone.

use tracing::trace;

use crate::{
    discounts::{DiscountError, DiscountOutcome, DiscountRule, select_matching},
    promotions::{PromotionError, matcher::LineMatcher},
    receipt::line::ReceiptLine,
};

/// `size` matching items for `price` (minor units).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlePrice {
    name: String,
    matcher: LineMatcher,
    size: usize,
    price: i64,
}

impl BundlePrice {
    /// Create a new bundle price promotion.
    ///
    /// # Errors
    ///
    /// Returns [`PromotionError::InvalidBundleSize`] if `size` is zero, or
    /// [`PromotionError::NegativePrice`] if `price` is negative.
    pub fn new(
        name: impl Into<String>,
        matcher: LineMatcher,
        size: usize,
        price: i64,
    ) -> Result<Self, PromotionError> {
        let name = name.into();

        if size == 0 {
            return Err(PromotionError::InvalidBundleSize { name, size });
        }

        if price < 0 {
            return Err(PromotionError::NegativePrice { name, price });
        }

        Ok(Self {
            name,
            matcher,
            size,
            price,
        })
    }

    /// Return the matcher
    pub fn matcher(&self) -> &LineMatcher {
        &self.matcher
    }

    /// Return the bundle size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Return the bundle price
    pub fn price(&self) -> i64 {
        self.price
    }
}

impl DiscountRule for BundlePrice {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, lines: &mut [ReceiptLine]) -> Result<DiscountOutcome, DiscountError> {
        let mut selected = select_matching(lines, &self.matcher);

        // Most expensive lines go into bundles first.
        selected.reverse();

        let mut outcome = DiscountOutcome::none();

        for bundle in selected.chunks_exact(self.size) {
            let mut bundle_total = 0_i64;

            for &line_idx in bundle {
                let line = lines
                    .get(line_idx)
                    .ok_or(DiscountError::LineNotFound(line_idx))?;

                bundle_total = bundle_total.saturating_add(line.price());
            }

            let saving = (bundle_total - self.price).max(0);

            trace!(rule = %self.name, bundle_total, saving, "priced bundle");

            outcome.add_amount(saving);
        }

        Ok(outcome)
    }
}
