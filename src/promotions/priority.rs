//! Priority Ordering

use std::cmp::Reverse;

use crate::promotions::Promotion;

/// Order promotions by descending priority.
///
/// The sort is stable, so promotions of equal priority keep the order the repository returned
/// them in. That order is what breaks ties when picking the best promotion.
pub fn by_priority(promotions: &mut [&Promotion]) {
    promotions.sort_by_key(|promotion| Reverse(promotion.priority));
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn higher_priority_first_and_ties_keep_input_order() {
        let low = Promotion::percentage("low", "Low", Decimal::ONE).with_priority(1);
        let first_mid = Promotion::percentage("mid-1", "Mid", Decimal::ONE).with_priority(5);
        let high = Promotion::percentage("high", "High", Decimal::ONE).with_priority(9);
        let second_mid = Promotion::percentage("mid-2", "Mid", Decimal::ONE).with_priority(5);

        let mut promotions = vec![&low, &first_mid, &high, &second_mid];

        by_priority(&mut promotions);

        let ids: Vec<&str> = promotions.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, ["high", "mid-1", "mid-2", "low"]);
    }

    #[test]
    fn negative_priorities_sort_below_zero() {
        let neg = Promotion::percentage("neg", "Neg", Decimal::ONE).with_priority(-3);
        let zero = Promotion::percentage("zero", "Zero", Decimal::ONE);

        let mut promotions = vec![&neg, &zero];

        by_priority(&mut promotions);

        assert_eq!(promotions.first().map(|p| p.id.as_str()), Some("zero"));
    }
}
