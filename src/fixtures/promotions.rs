//! Promotion Fixtures

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::promotions::{DiscountType, Promotion, PromotionConditions, Scope, TriggerType};

const fn default_trigger() -> TriggerType {
    TriggerType::Automatic
}

const fn default_scope() -> Scope {
    Scope::SiteWide
}

const fn default_active() -> bool {
    true
}

/// Promotion configuration from YAML fixtures
#[derive(Debug, Deserialize)]
pub struct PromotionFixture {
    /// Promotion id
    pub id: String,

    /// Redemption code for manually entered promotions
    #[serde(default)]
    pub code: Option<String>,

    /// Promotion name
    pub name: String,

    /// Customer facing description
    #[serde(default)]
    pub description: Option<String>,

    /// Trigger type, `automatic` when omitted
    #[serde(default = "default_trigger")]
    pub trigger: TriggerType,

    /// Discount type
    pub discount_type: DiscountType,

    /// Percentage points or major currency units
    pub discount_value: Decimal,

    /// Scope, `site_wide` when omitted
    #[serde(default = "default_scope")]
    pub scope: Scope,

    /// Scope targets
    #[serde(default)]
    pub targets: Vec<String>,

    /// Whether the promotion may combine with other stackable promotions
    #[serde(default)]
    pub stackable: bool,

    /// Priority, `0` when omitted
    #[serde(default)]
    pub priority: i32,

    /// Whether the promotion is switched on, `true` when omitted
    #[serde(default = "default_active")]
    pub active: bool,

    /// Start of the validity window (RFC 3339)
    #[serde(default)]
    pub starts_at: Option<Timestamp>,

    /// End of the validity window (RFC 3339)
    #[serde(default)]
    pub ends_at: Option<Timestamp>,

    /// Skip products that already carry a reduced price
    #[serde(default)]
    pub exclude_promoted_products: bool,
}

impl From<PromotionFixture> for Promotion {
    fn from(fixture: PromotionFixture) -> Self {
        Promotion {
            id: fixture.id.into(),
            code: fixture.code,
            name: fixture.name,
            description: fixture.description,
            trigger_type: fixture.trigger,
            discount_type: fixture.discount_type,
            discount_value: fixture.discount_value,
            scope: fixture.scope,
            targets: fixture.targets.into_iter().collect(),
            is_stackable: fixture.stackable,
            priority: fixture.priority,
            is_active: fixture.active,
            start_date: fixture.starts_at,
            end_date: fixture.ends_at,
            conditions: PromotionConditions {
                exclude_promoted_products: fixture.exclude_promoted_products,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn minimal_fixture_uses_defaults() -> TestResult {
        let fixture: PromotionFixture = serde_norway::from_str(
            "id: summer\nname: Summer\ndiscount_type: percentage\ndiscount_value: 20\n",
        )?;

        let promotion = Promotion::from(fixture);

        assert_eq!(promotion.trigger_type, TriggerType::Automatic);
        assert_eq!(promotion.scope, Scope::SiteWide);
        assert_eq!(promotion.discount_value, Decimal::from(20));
        assert!(promotion.is_active);
        assert!(!promotion.is_stackable);
        assert_eq!(promotion.priority, 0);
        assert!(promotion.start_date.is_none());
        assert!(promotion.end_date.is_none());

        Ok(())
    }

    #[test]
    fn full_fixture_maps_every_field() -> TestResult {
        let yaml = r#"
id: tees-5
code: TEES5
name: Tees
description: "5€ off tees"
trigger: code
discount_type: fixed
discount_value: "5.00"
scope: subcategory
targets: [tees]
stackable: true
priority: 7
active: false
starts_at: "2025-06-01T00:00:00Z"
ends_at: "2025-06-30T23:59:59Z"
exclude_promoted_products: true
"#;

        let promotion = Promotion::from(serde_norway::from_str::<PromotionFixture>(yaml)?);

        assert_eq!(promotion.id.as_str(), "tees-5");
        assert_eq!(promotion.code.as_deref(), Some("TEES5"));
        assert_eq!(promotion.trigger_type, TriggerType::Code);
        assert_eq!(promotion.discount_type, DiscountType::Fixed);
        assert_eq!(promotion.discount_value, Decimal::from(5));
        assert_eq!(promotion.scope, Scope::Subcategory);
        assert_eq!(promotion.targets.as_slice(), ["tees".to_string()]);
        assert!(promotion.is_stackable);
        assert_eq!(promotion.priority, 7);
        assert!(!promotion.is_active);
        assert_eq!(
            promotion.start_date,
            Some("2025-06-01T00:00:00Z".parse::<Timestamp>()?)
        );
        assert!(promotion.conditions.exclude_promoted_products);

        Ok(())
    }

    #[test]
    fn unknown_types_survive_parsing() -> TestResult {
        let yaml = "id: x\nname: X\ndiscount_type: bundle\ndiscount_value: 1\nscope: artist\n";

        let promotion = Promotion::from(serde_norway::from_str::<PromotionFixture>(yaml)?);

        assert_eq!(promotion.discount_type, DiscountType::Unknown);
        assert_eq!(promotion.scope, Scope::Unknown);

        Ok(())
    }
}
