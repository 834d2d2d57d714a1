//! Nth Item Free
//!
//! For every complete bundle of `every` matching lines, one line is free. The
//! free lines are always the cheapest matching lines, so `floor(n / every)` of
//! the lowest priced lines are zeroed ("third jam free", "3-for-2").

use tracing::trace;

use crate::{
    discounts::{DiscountError, DiscountOutcome, DiscountRule, reprice_line, select_matching},
    promotions::{PromotionError, matcher::LineMatcher},
    receipt::line::ReceiptLine,
};

/// Every `every`-th matching item free, cheapest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NthItemFree {
    name: String,
    matcher: LineMatcher,
    every: usize,
}

impl NthItemFree {
    /// Create a new promotion.
    ///
    /// # Errors
    ///
    /// Returns [`PromotionError::InvalidBundleSize`] if `every` is less than 2.
    pub fn new(
        name: impl Into<String>,
        matcher: LineMatcher,
        every: usize,
    ) -> Result<Self, PromotionError> {
        let name = name.into();

        if every < 2 {
            return Err(PromotionError::InvalidBundleSize { name, size: every });
        }

        Ok(Self {
            name,
            matcher,
            every,
        })
    }

    /// Pairs variant used by [`GroupSecondFree`](super::GroupSecondFree).
    pub(crate) fn pairs(name: String, matcher: LineMatcher) -> Self {
        Self {
            name,
            matcher,
            every: 2,
        }
    }

    /// Return the matcher
    pub fn matcher(&self) -> &LineMatcher {
        &self.matcher
    }

    /// Return the bundle size
    pub fn every(&self) -> usize {
        self.every
    }
}

impl DiscountRule for NthItemFree {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, lines: &mut [ReceiptLine]) -> Result<DiscountOutcome, DiscountError> {
        let selected = select_matching(lines, &self.matcher);
        let free = selected.len() / self.every;

        trace!(
            rule = %self.name,
            matched = selected.len(),
            free,
            "selected lines"
        );

        let mut outcome = DiscountOutcome::none();

        for &line_idx in selected.iter().take(free) {
            reprice_line(lines, line_idx, 0, &mut outcome)?;
        }

        Ok(outcome)
    }
}
