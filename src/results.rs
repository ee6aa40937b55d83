//! Promotion Application Results

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::Money;

use crate::{
    products::{Price, Product},
    promotions::{DiscountType, Promotion},
    resolution::Resolution,
};

/// Outcome of resolving promotions for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionApplicationResult {
    /// Whether any promotion applied
    pub has_promotion: bool,

    /// Promotion credited in the badge and message
    pub best_promotion: Option<Promotion>,

    /// Price the discount was taken from: the reduced price when set, else the list price
    pub original_price: Price,

    /// Price after every applied discount, never below zero
    pub discounted_price: Price,

    /// Summed discount of every applied promotion, which may exceed `original_price`
    pub discount_amount: Price,

    /// `discount_amount` as a percentage of `original_price`
    pub discount_percentage: Decimal,

    /// Every promotion applied
    pub all_promotions: Vec<Promotion>,

    /// Short display badge, e.g. `-20%` or `-10€`
    pub badge: String,

    /// Display message
    pub message: String,
}

impl PromotionApplicationResult {
    /// Result for a product no promotion applies to.
    pub fn none(product: &Product) -> Self {
        let price = product.base_price();

        Self {
            has_promotion: false,
            best_promotion: None,
            original_price: price,
            discounted_price: price,
            discount_amount: Money::from_minor(0, price.currency()),
            discount_percentage: Decimal::ZERO,
            all_promotions: Vec::new(),
            badge: String::new(),
            message: String::new(),
        }
    }

    /// Format a resolution into the result presented to callers.
    ///
    /// `discount_amount`, `discount_percentage` and the badge report the summed total as is, so
    /// stacked discounts may exceed the price. Only `discounted_price` is floored at zero.
    pub fn from_resolution(product: &Product, resolution: &Resolution<'_>) -> Self {
        let original = product.base_price();
        let currency = original.currency();
        let original_minor = original.to_minor_units();
        let total_minor = resolution.total.to_minor_units().max(0);

        let discounted_minor = original_minor.saturating_sub(total_minor).max(0);
        let discount_amount = Money::from_minor(total_minor, currency);

        let discount_percentage = if original_minor > 0 {
            Decimal::from(total_minor) / Decimal::from(original_minor) * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        Self {
            has_promotion: true,
            best_promotion: Some(resolution.best.clone()),
            original_price: original,
            discounted_price: Money::from_minor(discounted_minor, currency),
            discount_amount,
            discount_percentage,
            all_promotions: resolution.applied.iter().map(|p| (*p).clone()).collect(),
            badge: badge(resolution.best, discount_percentage, &discount_amount),
            message: message(resolution.best),
        }
    }

    /// Promotion id of the credited promotion, if any.
    pub fn best_promotion_id(&self) -> Option<&str> {
        self.best_promotion.as_ref().map(|p| p.id.as_str())
    }
}

/// Render the display badge.
///
/// Percentage promotions show the overall percentage taken, rounded to a whole number. Anything
/// else shows the overall amount taken, rounded to whole currency units.
pub fn badge(best: &Promotion, discount_percentage: Decimal, discount_amount: &Price) -> String {
    match best.discount_type {
        DiscountType::Percentage => format!("-{}%", whole(discount_percentage)),
        DiscountType::Fixed | DiscountType::Unknown => format!(
            "-{}{}",
            whole(*discount_amount.amount()),
            discount_amount.currency().symbol
        ),
    }
}

/// Render the display message: the description, else the name.
pub fn message(best: &Promotion) -> String {
    best.description
        .as_deref()
        .filter(|description| !description.is_empty())
        .unwrap_or(&best.name)
        .to_string()
}

fn whole(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;
    use smallvec::smallvec;

    use super::*;

    fn priced(minor: i64) -> Product {
        Product::new("p", "P", Money::from_minor(minor, EUR))
    }

    #[test]
    fn none_reports_base_price_untouched() {
        let product = priced(5_000).with_reduced_price(Money::from_minor(4_000, EUR));

        let result = PromotionApplicationResult::none(&product);

        assert!(!result.has_promotion);
        assert!(result.best_promotion.is_none());
        assert_eq!(result.original_price, Money::from_minor(4_000, EUR));
        assert_eq!(result.discounted_price, Money::from_minor(4_000, EUR));
        assert_eq!(result.discount_amount, Money::from_minor(0, EUR));
        assert_eq!(result.discount_percentage, Decimal::ZERO);
        assert!(result.all_promotions.is_empty());
        assert_eq!(result.badge, "");
        assert_eq!(result.message, "");
    }

    #[test]
    fn percentage_result_has_percentage_badge() {
        let product = priced(10_000);
        let promo = Promotion::percentage("twenty", "Twenty", Decimal::from(20))
            .with_description("20% off everything");

        let resolution = Resolution {
            best: &promo,
            best_amount: Money::from_minor(2_000, EUR),
            applied: smallvec![&promo],
            total: Money::from_minor(2_000, EUR),
        };

        let result = PromotionApplicationResult::from_resolution(&product, &resolution);

        assert!(result.has_promotion);
        assert_eq!(result.discounted_price, Money::from_minor(8_000, EUR));
        assert_eq!(result.discount_amount, Money::from_minor(2_000, EUR));
        assert_eq!(result.discount_percentage, Decimal::from(20));
        assert_eq!(result.badge, "-20%");
        assert_eq!(result.message, "20% off everything");
        assert_eq!(result.best_promotion_id(), Some("twenty"));
    }

    #[test]
    fn fixed_badge_rounds_to_whole_units_with_symbol() {
        let promo = Promotion::fixed("off", "Off", Decimal::new(75, 1));

        assert_eq!(
            badge(&promo, Decimal::from(15), &Money::from_minor(750, EUR)),
            "-8€"
        );
        assert_eq!(
            badge(&promo, Decimal::from(15), &Money::from_minor(1_000, EUR)),
            "-10€"
        );
    }

    #[test]
    fn percentage_badge_rounds_half_up() {
        let promo = Promotion::percentage("third", "Third", Decimal::from(33));

        assert_eq!(
            badge(&promo, Decimal::new(335, 1), &Money::from_minor(0, EUR)),
            "-34%"
        );
        assert_eq!(
            badge(&promo, Decimal::new(3349, 2), &Money::from_minor(0, EUR)),
            "-33%"
        );
    }

    #[test]
    fn message_falls_back_to_name() {
        let named = Promotion::fixed("n", "Summer sale", Decimal::ONE);
        let blank = Promotion::fixed("b", "Blank", Decimal::ONE).with_description("");
        let unnamed = Promotion::fixed("u", "", Decimal::ONE);

        assert_eq!(message(&named), "Summer sale");
        assert_eq!(message(&blank), "Blank");
        assert_eq!(message(&unnamed), "");
    }

    #[test]
    fn stacked_total_beyond_price_floors_only_the_price() {
        let product = priced(5_000);
        let a = Promotion::fixed("a", "A", Decimal::from(30)).stackable();
        let b = Promotion::fixed("b", "B", Decimal::from(30)).stackable();

        let resolution = Resolution {
            best: &a,
            best_amount: Money::from_minor(3_000, EUR),
            applied: smallvec![&a, &b],
            total: Money::from_minor(6_000, EUR),
        };

        let result = PromotionApplicationResult::from_resolution(&product, &resolution);

        assert_eq!(result.discounted_price, Money::from_minor(0, EUR));
        assert_eq!(result.discount_amount, Money::from_minor(6_000, EUR));
        assert_eq!(result.discount_percentage, Decimal::from(120));
        assert_eq!(result.badge, "-60€");
        assert_eq!(result.all_promotions.len(), 2);
    }

    #[test]
    fn percentage_above_one_hundred_is_reported_as_is() {
        let product = priced(5_000);
        let promo = Promotion::percentage("huge", "Huge", Decimal::from(150));

        let resolution = Resolution {
            best: &promo,
            best_amount: Money::from_minor(7_500, EUR),
            applied: smallvec![&promo],
            total: Money::from_minor(7_500, EUR),
        };

        let result = PromotionApplicationResult::from_resolution(&product, &resolution);

        assert_eq!(result.discounted_price, Money::from_minor(0, EUR));
        assert_eq!(result.discount_amount, Money::from_minor(7_500, EUR));
        assert_eq!(result.discount_percentage, Decimal::from(150));
        assert_eq!(result.badge, "-150%");
    }

    #[test]
    fn free_product_has_zero_percentage() {
        let product = priced(0);
        let promo = Promotion::fixed("f", "F", Decimal::from(5));

        let resolution = Resolution {
            best: &promo,
            best_amount: Money::from_minor(0, EUR),
            applied: smallvec![&promo],
            total: Money::from_minor(0, EUR),
        };

        let result = PromotionApplicationResult::from_resolution(&product, &resolution);

        assert_eq!(result.discount_percentage, Decimal::ZERO);
        assert_eq!(result.discounted_price, Money::from_minor(0, EUR));
        assert_eq!(result.badge, "-0€");
    }
}
