//! Discounts
//!
//! The capability every discount rule implements, and the outcome it reports.

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

use crate::{promotions::matcher::LineMatcher, receipt::line::ReceiptLine};

/// Errors raised while applying discount rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// A rule tried to set a line price outside `0..=catalog price`.
    #[error("invalid discount on SKU {sku}: price {attempted} is outside 0..={max}")]
    InvalidDiscount {
        /// SKU of the affected line
        sku: String,
        /// Price the rule attempted to set
        attempted: i64,
        /// Catalog price of the item
        max: i64,
    },

    /// A rule reported a negative flat discount amount.
    #[error("rule {rule} returned a negative discount amount: {amount}")]
    NegativeAmount {
        /// Name of the rule
        rule: String,
        /// Amount reported
        amount: i64,
    },

    /// A rule referenced a line that is not in the session.
    #[error("Line {0} not found")]
    LineNotFound(usize),
}

/// Price change made to a single line by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineAdjustment {
    /// Index of the line in the checkout session
    pub line_idx: usize,

    /// Effective price before the rule ran
    pub original_price: i64,

    /// Effective price after the rule ran
    pub final_price: i64,
}

impl LineAdjustment {
    /// Amount taken off the line by this adjustment.
    pub fn savings(&self) -> i64 {
        self.original_price - self.final_price
    }
}

/// Result of applying one rule.
///
/// A rule can take effect through a flat amount, through line price changes,
/// or both. Line changes have already been written to the lines when the
/// outcome is returned; `adjusted` only records them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscountOutcome {
    amount: i64,
    adjusted: SmallVec<[LineAdjustment; 10]>,
}

impl DiscountOutcome {
    /// An outcome with no effect.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// An outcome consisting of a flat amount only.
    #[must_use]
    pub fn flat(amount: i64) -> Self {
        Self {
            amount,
            adjusted: SmallVec::new(),
        }
    }

    /// Flat amount to subtract from the total, in minor units.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Add to the flat amount.
    pub fn add_amount(&mut self, amount: i64) {
        self.amount = self.amount.saturating_add(amount);
    }

    /// Record a line price change.
    pub fn push_adjustment(&mut self, adjustment: LineAdjustment) {
        self.adjusted.push(adjustment);
    }

    /// Line price changes made by the rule.
    pub fn adjusted_lines(&self) -> &[LineAdjustment] {
        &self.adjusted
    }

    /// Whether the rule had no effect.
    pub fn is_empty(&self) -> bool {
        self.amount == 0 && self.adjusted.is_empty()
    }

    /// Total reduction from both the flat amount and line changes.
    pub fn savings(&self) -> i64 {
        self.adjusted
            .iter()
            .map(LineAdjustment::savings)
            .fold(self.amount, i64::saturating_add)
    }
}

/// A discount rule run by the checkout over the full list of lines.
///
/// Rules must be pure functions of the line state they are handed: the checkout
/// resets every line to its catalog price and runs all rules again each time
/// the total is requested. Rules run in the order they were configured and see
/// the price changes made by earlier rules.
pub trait DiscountRule: fmt::Debug {
    /// Human readable rule name, used in logs and receipts.
    fn name(&self) -> &str;

    /// Apply the rule to the lines.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the rule produces an invalid line price.
    fn apply(&self, lines: &mut [ReceiptLine]) -> Result<DiscountOutcome, DiscountError>;
}

impl<R: DiscountRule + ?Sized> DiscountRule for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn apply(&self, lines: &mut [ReceiptLine]) -> Result<DiscountOutcome, DiscountError> {
        (**self).apply(lines)
    }
}

/// Indexes of the lines whose items match, cheapest first (scan order on ties).
pub fn select_matching(lines: &[ReceiptLine], matcher: &LineMatcher) -> SmallVec<[usize; 10]> {
    let mut selected: SmallVec<[(usize, &ReceiptLine); 10]> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| matcher.matches(line.item()))
        .collect();

    selected.sort_by(|(_, a), (_, b)| a.cmp(b));

    selected.into_iter().map(|(idx, _)| idx).collect()
}

/// Set a line price through the invariant check and record the change.
///
/// # Errors
///
/// Returns [`DiscountError::LineNotFound`] for an unknown index, or
/// [`DiscountError::InvalidDiscount`] for an out of range price.
pub fn reprice_line(
    lines: &mut [ReceiptLine],
    line_idx: usize,
    price: i64,
    outcome: &mut DiscountOutcome,
) -> Result<(), DiscountError> {
    let line = lines
        .get_mut(line_idx)
        .ok_or(DiscountError::LineNotFound(line_idx))?;

    let original_price = line.price();

    line.set_price(price)?;

    if original_price != price {
        outcome.push_adjustment(LineAdjustment {
            line_idx,
            original_price,
            final_price: price,
        });
    }

    Ok(())
}
