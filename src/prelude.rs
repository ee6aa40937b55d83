//! Rebate Prelude
//!
//! Convenience exports for common library consumers.

pub use crate::{
    discounts::{DiscountError, best_promotion, calculate_discount, largest_discount},
    engine::{PromotionEngine, evaluate},
    fixtures::{Catalog, FixtureError},
    ids::TypedId,
    products::{Price, Product, ProductId},
    promotions::{
        DiscountType, Promotion, PromotionConditions, PromotionId, Scope, TriggerType,
        eligibility::{Ineligibility, eligible_promotions, is_eligible},
        priority::by_priority,
    },
    report::{ReportError, write_report},
    repository::{InMemoryPromotionRepository, PromotionRepository, RepositoryError},
    resolution::{Resolution, resolve},
    results::PromotionApplicationResult,
};
