//! Product Fixtures

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;

use crate::{
    discounts::minor_units,
    fixtures::FixtureError,
    products::{Price, Product},
};

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: String,

    /// Product name
    pub name: String,

    /// Category id
    #[serde(default)]
    pub category: Option<String>,

    /// Subcategory id
    #[serde(default)]
    pub subcategory: Option<String>,

    /// Available sizes
    #[serde(default)]
    pub sizes: Vec<String>,

    /// List price (e.g., "29.90 EUR")
    pub price: String,

    /// Reduced price (e.g., "24.90 EUR")
    #[serde(default)]
    pub reduced_price: Option<String>,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let original_price = parse_price(&fixture.price)?;

        let reduced_price = fixture
            .reduced_price
            .as_deref()
            .map(parse_price)
            .transpose()?;

        if let Some(reduced) = reduced_price
            && reduced.currency() != original_price.currency()
        {
            return Err(FixtureError::CurrencyMismatch(
                original_price.currency().iso_alpha_code.to_string(),
                reduced.currency().iso_alpha_code.to_string(),
            ));
        }

        Ok(Product {
            id: fixture.id.into(),
            name: fixture.name,
            category_id: fixture.category,
            subcategory_id: fixture.subcategory,
            sizes: fixture.sizes.into_iter().collect(),
            original_price,
            reduced_price,
        })
    }
}

/// Parse price string (e.g., "29.90 EUR") into a price
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount cannot
/// be parsed as a decimal, or if the currency code is not an ISO 4217 code.
pub fn parse_price(s: &str) -> Result<Price, FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency: &'static Currency = iso::find(currency_code)
        .ok_or_else(|| FixtureError::UnknownCurrency(currency_code.to_string()))?;

    let minor =
        minor_units(amount, currency).map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    Ok(Money::from_minor(minor, currency))
}
