//! Promotions
//!
//! Concrete discount rules, and the [`Promotion`] enum the fixture loader builds.

use thiserror::Error;

use crate::{
    discounts::{DiscountError, DiscountOutcome, DiscountRule},
    promotions::types::{BundlePrice, GroupSecondFree, NthItemFree},
    receipt::line::ReceiptLine,
};

pub mod matcher;
pub mod types;

/// Errors raised when constructing a promotion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromotionError {
    /// Bundle size cannot be used by this promotion type.
    #[error("promotion {name} has an invalid bundle size: {size}")]
    InvalidBundleSize {
        /// Promotion name
        name: String,
        /// Configured size
        size: usize,
    },

    /// Bundle price is negative.
    #[error("promotion {name} has a negative price: {price}")]
    NegativePrice {
        /// Promotion name
        name: String,
        /// Configured price
        price: i64,
    },
}

/// Promotion enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Promotion {
    /// Second matching item free
    GroupSecondFree(GroupSecondFree),

    /// Every nth matching item free
    NthItemFree(NthItemFree),

    /// Fixed price for a bundle of matching items
    BundlePrice(BundlePrice),
}

impl Promotion {
    fn rule(&self) -> &dyn DiscountRule {
        match self {
            Promotion::GroupSecondFree(second_free) => second_free,
            Promotion::NthItemFree(nth_free) => nth_free,
            Promotion::BundlePrice(bundle_price) => bundle_price,
        }
    }
}

impl DiscountRule for Promotion {
    fn name(&self) -> &str {
        self.rule().name()
    }

    fn apply(&self, lines: &mut [ReceiptLine]) -> Result<DiscountOutcome, DiscountError> {
        self.rule().apply(lines)
    }
}

impl From<GroupSecondFree> for Promotion {
    fn from(promotion: GroupSecondFree) -> Self {
        Promotion::GroupSecondFree(promotion)
    }
}

impl From<NthItemFree> for Promotion {
    fn from(promotion: NthItemFree) -> Self {
        Promotion::NthItemFree(promotion)
    }
}

impl From<BundlePrice> for Promotion {
    fn from(promotion: BundlePrice) -> Self {
        Promotion::BundlePrice(promotion)
    }
}
