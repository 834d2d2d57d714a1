//! Line Matchers
//!
//! Predicates over item attributes used to decide which lines a promotion covers.

use serde::Deserialize;

use crate::items::Item;

/// Selects items by their catalog attributes. Comparisons are exact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineMatcher {
    /// Item brand equals the value
    Brand(String),

    /// Item article group equals the value
    Group(String),

    /// Item SKU equals the value
    Sku(String),

    /// Matches when every inner matcher matches
    All(Vec<LineMatcher>),

    /// Matches when any inner matcher matches
    Any(Vec<LineMatcher>),
}

impl LineMatcher {
    /// Matcher for a brand.
    pub fn brand(brand: impl Into<String>) -> Self {
        Self::Brand(brand.into())
    }

    /// Matcher for an article group.
    pub fn group(group: impl Into<String>) -> Self {
        Self::Group(group.into())
    }

    /// Matcher for a single SKU.
    pub fn sku(sku: impl Into<String>) -> Self {
        Self::Sku(sku.into())
    }

    /// Return whether the item is covered by this matcher.
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            LineMatcher::Brand(brand) => item.brand() == brand,
            LineMatcher::Group(group) => item.group() == group,
            LineMatcher::Sku(sku) => item.sku() == sku,
            LineMatcher::All(matchers) => matchers.iter().all(|matcher| matcher.matches(item)),
            LineMatcher::Any(matchers) => matchers.iter().any(|matcher| matcher.matches(item)),
        }
    }
}
