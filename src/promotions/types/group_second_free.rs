//! Group Second Free
//!
//! "Second one free, mix and match": matching lines are paired up and the
//! cheaper member of every complete pair is free. With `n` matching lines the
//! `floor(n / 2)` cheapest lines are zeroed.

use crate::{
    discounts::{DiscountError, DiscountOutcome, DiscountRule},
    promotions::{matcher::LineMatcher, types::NthItemFree},
    receipt::line::ReceiptLine,
};

/// Second matching item free, cheapest items first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSecondFree {
    inner: NthItemFree,
}

impl GroupSecondFree {
    /// Create a new promotion over the lines selected by `matcher`.
    pub fn new(name: impl Into<String>, matcher: LineMatcher) -> Self {
        Self {
            inner: NthItemFree::pairs(name.into(), matcher),
        }
    }

    /// Return the matcher
    pub fn matcher(&self) -> &LineMatcher {
        self.inner.matcher()
    }
}

impl DiscountRule for GroupSecondFree {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn apply(&self, lines: &mut [ReceiptLine]) -> Result<DiscountOutcome, DiscountError> {
        self.inner.apply(lines)
    }
}
