//! Promotion Fixtures

use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, products::parse_price},
    promotions::{
        Promotion,
        matcher::LineMatcher,
        types::{BundlePrice, GroupSecondFree, NthItemFree},
    },
};

/// Wrapper for promotions in YAML. Promotions are applied in file order.
#[derive(Debug, Deserialize)]
pub struct PromotionsFixture {
    /// Promotion fixtures, in application order
    pub promotions: Vec<PromotionFixture>,
}

/// Promotion fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionFixture {
    /// Second matching item free
    GroupSecondFree {
        /// Promotion name
        name: String,

        /// Lines covered by the promotion
        matcher: LineMatcher,
    },

    /// Every nth matching item free
    NthItemFree {
        /// Promotion name
        name: String,

        /// Lines covered by the promotion
        matcher: LineMatcher,

        /// Bundle size
        every: usize,
    },

    /// Fixed price for a bundle of matching items
    BundlePrice {
        /// Promotion name
        name: String,

        /// Lines covered by the promotion
        matcher: LineMatcher,

        /// Bundle size
        size: usize,

        /// Bundle price (e.g., "4.00 EUR")
        price: String,
    },
}

impl PromotionFixture {
    /// Convert to a `Promotion`.
    ///
    /// `currency` is the catalog currency, when known; bundle prices must use it.
    ///
    /// # Errors
    ///
    /// Returns an error if a price cannot be parsed, uses another currency, or
    /// the promotion parameters are invalid.
    pub fn try_into_promotion(
        self,
        currency: Option<&'static Currency>,
    ) -> Result<(Promotion, Option<&'static Currency>), FixtureError> {
        match self {
            PromotionFixture::GroupSecondFree { name, matcher } => {
                Ok((GroupSecondFree::new(name, matcher).into(), None))
            }
            PromotionFixture::NthItemFree {
                name,
                matcher,
                every,
            } => Ok((NthItemFree::new(name, matcher, every)?.into(), None)),
            PromotionFixture::BundlePrice {
                name,
                matcher,
                size,
                price,
            } => {
                let (minor_units, price_currency) = parse_price(&price)?;

                if let Some(expected) = currency.filter(|expected| *expected != price_currency) {
                    return Err(FixtureError::CurrencyMismatch(
                        expected.iso_alpha_code.to_string(),
                        price_currency.iso_alpha_code.to_string(),
                    ));
                }

                let promotion = BundlePrice::new(name, matcher, size, minor_units)?;

                Ok((promotion.into(), Some(price_currency)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;

    use crate::{discounts::DiscountRule, promotions::PromotionError};

    use super::*;

    #[test]
    fn promotion_fixture_rejects_unknown_type() {
        let yaml = r"
type: unknown_promotion
name: Test
matcher:
  brand: Nivea
";
        let result: Result<PromotionFixture, _> = serde_norway::from_str(yaml);

        assert!(result.is_err());
    }

    #[test]
    fn group_second_free_fixture_converts() -> Result<(), FixtureError> {
        let yaml = r"
type: group_second_free
name: Nivea tweede gratis
matcher:
  brand: Nivea
";
        let fixture: PromotionFixture = serde_norway::from_str(yaml)?;

        let (promotion, currency) = fixture.try_into_promotion(Some(EUR))?;

        assert_eq!(promotion.name(), "Nivea tweede gratis");
        assert!(currency.is_none());
        assert!(matches!(
            promotion,
            Promotion::GroupSecondFree(ref inner) if inner.matcher() == &LineMatcher::brand("Nivea")
        ));

        Ok(())
    }

    #[test]
    fn bundle_price_fixture_parses_price() -> Result<(), FixtureError> {
        let fixture = PromotionFixture::BundlePrice {
            name: "Dove 3 voor 4 euro".to_string(),
            matcher: LineMatcher::brand("Dove"),
            size: 3,
            price: "4.00 EUR".to_string(),
        };

        let (promotion, currency) = fixture.try_into_promotion(None)?;

        assert_eq!(currency, Some(EUR));
        assert!(matches!(
            promotion,
            Promotion::BundlePrice(ref inner) if inner.price() == 400 && inner.size() == 3
        ));

        Ok(())
    }

    #[test]
    fn bundle_price_fixture_rejects_other_currency() {
        let fixture = PromotionFixture::BundlePrice {
            name: "Dove 3 voor 4 pond".to_string(),
            matcher: LineMatcher::brand("Dove"),
            size: 3,
            price: "4.00 GBP".to_string(),
        };

        let result = fixture.try_into_promotion(Some(EUR));

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(expected, found))
            if expected == "EUR" && found == "GBP"));
    }

    #[test]
    fn nth_item_free_fixture_rejects_small_bundle() {
        let fixture = PromotionFixture::NthItemFree {
            name: "broken".to_string(),
            matcher: LineMatcher::group("Jam"),
            every: 1,
        };

        let result = fixture.try_into_promotion(None);

        assert!(matches!(
            result,
            Err(FixtureError::Promotion(PromotionError::InvalidBundleSize { size: 1, .. }))
        ));
    }
}
