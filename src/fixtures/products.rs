//! Product Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;

use crate::{fixtures::FixtureError, items::Item};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of SKU -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Description printed on the receipt
    pub description: String,

    /// Article group
    pub group: String,

    /// Brand, empty for unbranded articles
    #[serde(default)]
    pub brand: String,

    /// Product price (e.g., "1.35 EUR")
    pub price: String,
}

impl ProductFixture {
    /// Convert to an item registered under `sku`, returning the price currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be parsed.
    pub fn try_into_item(self, sku: String) -> Result<(Item, &'static Currency), FixtureError> {
        let (minor_units, currency) = parse_price(&self.price)?;

        let item = Item::new(sku, self.group, self.brand, self.description, minor_units);

        Ok((item, currency))
    }
}

/// Parse a shelf price such as `"1.35 EUR"` into minor units and currency.
///
/// At most two decimal places are accepted; sub-cent amounts are rejected
/// rather than rounded.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] if the string is not `AMOUNT CURRENCY`
/// or the amount is negative, unparsable or finer than a cent, and
/// [`FixtureError::UnknownCurrency`] for an unsupported currency code.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let invalid = || FixtureError::InvalidPrice(s.to_string());

    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let amount = amount.parse::<Decimal>().map_err(|_err| invalid())?;

    if amount.is_sign_negative() || amount.normalize().scale() > 2 {
        return Err(invalid());
    }

    let minor_units = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(invalid)?;

    let currency = match code {
        "EUR" => EUR,
        "GBP" => GBP,
        "USD" => USD,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_reads_minor_units() -> Result<(), FixtureError> {
        let (minor, currency) = parse_price("1.35 EUR")?;

        assert_eq!(minor, 135);
        assert_eq!(currency, EUR);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("1.35EUR");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_negative_amount() {
        let result = parse_price("-1.35 EUR");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_sub_cent_amount() {
        let result = parse_price("1.355 EUR");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(price)) if price == "1.355 EUR"));
    }

    #[test]
    fn parse_price_rejects_trailing_tokens() {
        let result = parse_price("1.35 EUR each");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("1.35 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_accepts_gbp_and_usd() -> Result<(), FixtureError> {
        let (gbp_minor, gbp) = parse_price("2.50 GBP")?;
        let (usd_minor, usd) = parse_price("1 USD")?;

        assert_eq!(gbp_minor, 250);
        assert_eq!(gbp, GBP);
        assert_eq!(usd_minor, 100);
        assert_eq!(usd, USD);

        Ok(())
    }

    #[test]
    fn product_fixture_defaults_brand() -> Result<(), FixtureError> {
        let fixture: ProductFixture = serde_norway::from_str(
            "description: Brood volkoren\ngroup: Brood\nprice: 1.95 EUR\n",
        )?;

        let (item, currency) = fixture.try_into_item("4001".to_string())?;

        assert_eq!(item.brand(), "");
        assert_eq!(item.price(), 195);
        assert_eq!(currency, EUR);

        Ok(())
    }
}
