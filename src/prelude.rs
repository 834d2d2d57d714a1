//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError, InMemoryCatalog},
    checkout::Checkout,
    discounts::{DiscountError, DiscountOutcome, DiscountRule, LineAdjustment},
    fixtures::{Fixture, FixtureError},
    items::Item,
    observer::{CheckoutObserver, NoopObserver},
    promotions::{
        Promotion, PromotionError,
        matcher::LineMatcher,
        types::{BundlePrice, GroupSecondFree, NthItemFree},
    },
    receipt::{Posting, PostingEntry, Receipt, ReceiptError, line::ReceiptLine},
};
