//! Eligibility
//!
//! Narrows the candidates a repository returns for a product down to the promotions that are
//! currently allowed to apply to it.

use std::fmt;

use jiff::Timestamp;
use tracing::trace;

use crate::{
    products::Product,
    promotions::{Promotion, TriggerType},
};

/// The first rule a promotion failed, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligibility {
    /// Not an automatic promotion
    NotAutomatic,

    /// Switched off
    Inactive,

    /// Start date is still in the future
    NotStarted,

    /// End date has passed
    Expired,

    /// Product already carries a reduced price and the promotion excludes those
    ProductAlreadyPromoted,

    /// Scope is not one the engine understands
    UnknownScope,
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Ineligibility::NotAutomatic => "not automatic",
            Ineligibility::Inactive => "inactive",
            Ineligibility::NotStarted => "not started",
            Ineligibility::Expired => "expired",
            Ineligibility::ProductAlreadyPromoted => "product already promoted",
            Ineligibility::UnknownScope => "unknown scope",
        };

        f.write_str(reason)
    }
}

/// Check a promotion against the product at `now`.
///
/// # Errors
///
/// Returns the first [`Ineligibility`] rule the promotion fails.
pub fn check(promotion: &Promotion, product: &Product, now: Timestamp) -> Result<(), Ineligibility> {
    if promotion.trigger_type != TriggerType::Automatic {
        return Err(Ineligibility::NotAutomatic);
    }

    if !promotion.is_active {
        return Err(Ineligibility::Inactive);
    }

    if promotion.start_date.is_some_and(|start| start > now) {
        return Err(Ineligibility::NotStarted);
    }

    if promotion.end_date.is_some_and(|end| end < now) {
        return Err(Ineligibility::Expired);
    }

    if promotion.conditions.exclude_promoted_products && product.is_reduced() {
        return Err(Ineligibility::ProductAlreadyPromoted);
    }

    if !promotion.scope.is_known() {
        return Err(Ineligibility::UnknownScope);
    }

    Ok(())
}

/// Whether the promotion may apply to the product at `now`.
pub fn is_eligible(promotion: &Promotion, product: &Product, now: Timestamp) -> bool {
    check(promotion, product, now).is_ok()
}

/// Keep the candidates that may apply to the product at `now`, preserving their order.
pub fn eligible_promotions<'p>(
    candidates: &'p [Promotion],
    product: &Product,
    now: Timestamp,
) -> Vec<&'p Promotion> {
    candidates
        .iter()
        .filter(|promotion| match check(promotion, product, now) {
            Ok(()) => true,
            Err(reason) => {
                trace!(
                    promotion_id = %promotion.id,
                    product_id = %product.id,
                    %reason,
                    "promotion not eligible"
                );

                false
            }
        })
        .collect()
}
