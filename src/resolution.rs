//! Conflict Resolution
//!
//! Decides which of a product's eligible promotions are actually applied.
//!
//! Non-stackable promotions are exclusive: when any are eligible, the single best of them is
//! applied and every stackable promotion is ignored, whatever its priority or size. Only when no
//! non-stackable promotion is eligible do the stackable ones apply, all of them together, with
//! their individual discounts summed against the same base price.
//!
//! The promotion credited for display is always the single largest individual discount among
//! the applied set. Under stacking that promotion's own amount differs from the summed total.

use rusty_money::Money;
use smallvec::SmallVec;

use crate::{
    discounts::{best_promotion, discount_or_zero, largest_discount},
    products::{Price, Product},
    promotions::Promotion,
};

/// Promotions chosen for a product and the discount they add up to.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'p> {
    /// Promotion credited in the badge and message
    pub best: &'p Promotion,

    /// Discount the credited promotion yields on its own
    pub best_amount: Price,

    /// Every promotion applied, in priority order
    pub applied: SmallVec<[&'p Promotion; 4]>,

    /// Combined discount of every applied promotion
    pub total: Price,
}

impl Resolution<'_> {
    /// Whether more than one promotion was combined.
    pub fn is_stacked(&self) -> bool {
        self.applied.len() > 1
    }
}

/// Resolve a product's priority-ordered eligible promotions into the ones that apply.
///
/// Returns `None` when `eligible` is empty.
pub fn resolve<'p>(product: &Product, eligible: &[&'p Promotion]) -> Option<Resolution<'p>> {
    let (stackable, exclusive): (SmallVec<[&'p Promotion; 4]>, SmallVec<[&'p Promotion; 4]>) =
        eligible.iter().copied().partition(|promotion| promotion.is_stackable);

    if !exclusive.is_empty() {
        let (best, best_amount) = best_promotion(product, &exclusive)?;

        return Some(Resolution {
            best,
            best_amount,
            applied: SmallVec::from_slice(&[best]),
            total: best_amount,
        });
    }

    let amounts: SmallVec<[(&'p Promotion, Price); 4]> = stackable
        .iter()
        .map(|promotion| (*promotion, discount_or_zero(product, promotion)))
        .collect();

    let (best, best_amount) = largest_discount(amounts.iter().copied())?;

    let total_minor = amounts
        .iter()
        .map(|(_, amount)| amount.to_minor_units())
        .fold(0_i64, i64::saturating_add);

    Some(Resolution {
        best,
        best_amount,
        applied: stackable,
        total: Money::from_minor(total_minor, product.currency()),
    })
}
