//! Discounts
//!
//! Per-promotion discount arithmetic. All amounts are worked in the minor units of the product's
//! currency so percentage rounding happens exactly once per promotion.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::warn;

use crate::{
    products::{Price, Product},
    promotions::{DiscountType, Promotion},
};

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed")]
    PercentConversion,

    /// Fixed amount could not be represented in minor units.
    #[error("amount {0} cannot be represented in minor units")]
    AmountConversion(Decimal),
}

/// Calculate the discount a single promotion yields on the product's current price.
///
/// The price discounted from is [`Product::base_price`]. Percentage discounts are rounded to the
/// nearest minor unit, half away from zero. Fixed discounts are clamped to the price. Unknown
/// discount types contribute nothing. The result is never negative.
///
/// # Errors
///
/// Returns a [`DiscountError`] if the discount cannot be represented in minor units.
pub fn calculate_discount(product: &Product, promotion: &Promotion) -> Result<Price, DiscountError> {
    let price = product.base_price();
    let price_minor = price.to_minor_units();

    let discount_minor = match promotion.discount_type {
        DiscountType::Percentage => percent_of_minor(promotion.discount_value, price_minor)?,
        DiscountType::Fixed => {
            minor_units(promotion.discount_value, price.currency())?.min(price_minor)
        }
        DiscountType::Unknown => 0,
    };

    Ok(Money::from_minor(discount_minor.max(0), price.currency()))
}

/// Calculate the discount, treating any arithmetic failure as no discount.
pub fn discount_or_zero(product: &Product, promotion: &Promotion) -> Price {
    calculate_discount(product, promotion).unwrap_or_else(|error| {
        warn!(
            promotion_id = %promotion.id,
            product_id = %product.id,
            %error,
            "discount could not be calculated; treating as zero"
        );

        Money::from_minor(0, product.currency())
    })
}

/// Pick the promotion with the largest discount, along with that discount.
///
/// Ties keep the earliest promotion in `promotions`, so callers sorting by priority first get
/// priority as the tie-breaker.
pub fn best_promotion<'p>(
    product: &Product,
    promotions: &[&'p Promotion],
) -> Option<(&'p Promotion, Price)> {
    largest_discount(
        promotions
            .iter()
            .map(|promotion| (*promotion, discount_or_zero(product, promotion))),
    )
}

/// Pick the largest of already calculated discounts, keeping the earliest on ties.
pub fn largest_discount<'p>(
    discounts: impl IntoIterator<Item = (&'p Promotion, Price)>,
) -> Option<(&'p Promotion, Price)> {
    discounts
        .into_iter()
        .fold(None, |best, candidate| match best {
            Some((_, amount)) if candidate.1.to_minor_units() <= amount.to_minor_units() => best,
            _ => Some(candidate),
        })
}

/// Calculate `points` percent of a minor unit amount, rounded half away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the result overflows.
pub fn percent_of_minor(points: Decimal, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    points
        .checked_mul(minor)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Convert a major unit amount into minor units of the currency, rounded half away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::AmountConversion`] if the amount overflows.
pub fn minor_units(amount: Decimal, currency: &Currency) -> Result<i64, DiscountError> {
    let scale = Decimal::from_i64(10_i64.pow(currency.exponent))
        .ok_or(DiscountError::AmountConversion(amount))?;

    amount
        .checked_mul(scale)
        .ok_or(DiscountError::AmountConversion(amount))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::AmountConversion(amount))
}
