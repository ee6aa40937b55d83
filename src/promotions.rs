//! Promotions

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{ids::TypedId, products::Product};

pub mod eligibility;
pub mod priority;

/// Promotion Id
pub type PromotionId = TypedId<Promotion>;

/// How a promotion is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    /// Applied without customer action
    Automatic,

    /// Redeemed by entering a code
    Code,

    /// Any trigger this engine does not recognise
    #[serde(other)]
    Unknown,
}

/// How a promotion's discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Percentage points off the price (e.g. `20` for 20% off)
    Percentage,

    /// Amount off the price in major currency units (e.g. `5` for 5€ off)
    Fixed,

    /// Any discount type this engine does not recognise
    #[serde(other)]
    Unknown,
}

/// Which products a promotion declares itself for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Products whose id is listed in the targets
    Product,

    /// Products whose category is listed in the targets
    Category,

    /// Products whose subcategory is listed in the targets
    Subcategory,

    /// Products offered in any size listed in the targets
    Size,

    /// Every product
    #[serde(alias = "site-wide", alias = "sitewide")]
    SiteWide,

    /// Any scope this engine does not recognise
    #[serde(other)]
    Unknown,
}

impl Scope {
    /// Whether the scope is one the engine knows how to evaluate.
    pub const fn is_known(self) -> bool {
        !matches!(self, Scope::Unknown)
    }

    /// Whether a promotion with this scope and these targets could apply to the product.
    pub fn covers(self, targets: &[String], product: &Product) -> bool {
        let listed = |value: Option<&str>| value.is_some_and(|v| targets.iter().any(|t| t == v));

        match self {
            Scope::SiteWide => true,
            Scope::Product => listed(Some(product.id.as_str())),
            Scope::Category => listed(product.category_id.as_deref()),
            Scope::Subcategory => listed(product.subcategory_id.as_deref()),
            Scope::Size => product.sizes.iter().any(|size| listed(Some(size.as_str()))),
            Scope::Unknown => false,
        }
    }
}

/// Extra restrictions on where a promotion may apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromotionConditions {
    /// Skip products that already carry a reduced price
    pub exclude_promoted_products: bool,
}

/// A named discount rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion {
    /// Promotion id
    pub id: PromotionId,

    /// Redemption code, used only by the manual entry path
    pub code: Option<String>,

    /// Promotion name
    pub name: String,

    /// Customer facing description
    pub description: Option<String>,

    /// How the promotion is triggered
    pub trigger_type: TriggerType,

    /// How `discount_value` is interpreted
    pub discount_type: DiscountType,

    /// Percentage points or major currency units, depending on `discount_type`
    pub discount_value: Decimal,

    /// Which products the promotion declares itself for
    pub scope: Scope,

    /// Ids, categories, subcategories or sizes the scope refers to
    pub targets: SmallVec<[String; 4]>,

    /// Whether the promotion may combine with other stackable promotions
    pub is_stackable: bool,

    /// Higher priorities are preferred
    pub priority: i32,

    /// Whether the promotion is switched on
    pub is_active: bool,

    /// First instant the promotion is valid, if bounded
    pub start_date: Option<Timestamp>,

    /// Last instant the promotion is valid, if bounded
    pub end_date: Option<Timestamp>,

    /// Extra restrictions
    pub conditions: PromotionConditions,
}

impl Promotion {
    /// Create an active, automatic, non-stackable, site-wide promotion with priority `0`.
    pub fn new(
        id: impl Into<PromotionId>,
        name: impl Into<String>,
        discount_type: DiscountType,
        discount_value: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            code: None,
            name: name.into(),
            description: None,
            trigger_type: TriggerType::Automatic,
            discount_type,
            discount_value,
            scope: Scope::SiteWide,
            targets: SmallVec::new(),
            is_stackable: false,
            priority: 0,
            is_active: true,
            start_date: None,
            end_date: None,
            conditions: PromotionConditions::default(),
        }
    }

    /// Percentage-off promotion, `points` being percentage points.
    pub fn percentage(id: impl Into<PromotionId>, name: impl Into<String>, points: Decimal) -> Self {
        Self::new(id, name, DiscountType::Percentage, points)
    }

    /// Fixed-amount-off promotion, `amount` being major currency units.
    pub fn fixed(id: impl Into<PromotionId>, name: impl Into<String>, amount: Decimal) -> Self {
        Self::new(id, name, DiscountType::Fixed, amount)
    }

    /// Set the description and return the promotion.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the trigger type and return the promotion.
    #[must_use]
    pub fn with_trigger(mut self, trigger_type: TriggerType) -> Self {
        self.trigger_type = trigger_type;
        self
    }

    /// Set the scope and its targets and return the promotion.
    #[must_use]
    pub fn with_scope<I, S>(mut self, scope: Scope, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope = scope;
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the promotion stackable and return it.
    #[must_use]
    pub fn stackable(mut self) -> Self {
        self.is_stackable = true;
        self
    }

    /// Set the priority and return the promotion.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Switch the promotion off and return it.
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Bound the validity window and return the promotion.
    #[must_use]
    pub fn valid_between(mut self, start: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Exclude products that already carry a reduced price and return the promotion.
    #[must_use]
    pub fn excluding_promoted_products(mut self) -> Self {
        self.conditions.exclude_promoted_products = true;
        self
    }

    /// Whether the promotion's declared scope could cover the product.
    pub fn covers(&self, product: &Product) -> bool {
        self.scope.covers(&self.targets, product)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::EUR};

    use super::*;

    fn tee() -> Product {
        Product::new("tee-black", "Black Tee", Money::from_minor(3000, EUR))
            .with_category("apparel")
            .with_subcategory("tees")
            .with_size("M")
    }

    #[test]
    fn site_wide_covers_everything() {
        let promo = Promotion::percentage("all", "All", Decimal::TEN);

        assert!(promo.covers(&tee()));
    }

    #[test]
    fn targeted_scopes_match_on_their_own_field() {
        let product = tee();

        let by_id = Promotion::percentage("p", "P", Decimal::TEN)
            .with_scope(Scope::Product, ["tee-black"]);
        let by_category = Promotion::percentage("c", "C", Decimal::TEN)
            .with_scope(Scope::Category, ["apparel"]);
        let by_subcategory = Promotion::percentage("s", "S", Decimal::TEN)
            .with_scope(Scope::Subcategory, ["tees"]);
        let by_size =
            Promotion::percentage("z", "Z", Decimal::TEN).with_scope(Scope::Size, ["XL", "M"]);

        assert!(by_id.covers(&product));
        assert!(by_category.covers(&product));
        assert!(by_subcategory.covers(&product));
        assert!(by_size.covers(&product));
    }

    #[test]
    fn targeted_scopes_reject_other_products() {
        let product = tee();

        let by_id =
            Promotion::percentage("p", "P", Decimal::TEN).with_scope(Scope::Product, ["poster"]);
        let by_category =
            Promotion::percentage("c", "C", Decimal::TEN).with_scope(Scope::Category, ["prints"]);
        let by_subcategory = Promotion::percentage("s", "S", Decimal::TEN)
            .with_scope(Scope::Subcategory, ["apparel"]);
        let by_size = Promotion::percentage("z", "Z", Decimal::TEN).with_scope(Scope::Size, ["S"]);

        assert!(!by_id.covers(&product));
        assert!(!by_category.covers(&product));
        assert!(!by_subcategory.covers(&product));
        assert!(!by_size.covers(&product));
    }

    #[test]
    fn uncategorised_product_is_not_covered_by_category_scope() {
        let product = Product::new("loose", "Loose", Money::from_minor(100, EUR));
        let promo =
            Promotion::percentage("c", "C", Decimal::TEN).with_scope(Scope::Category, ["apparel"]);

        assert!(!promo.covers(&product));
    }

    #[test]
    fn unknown_scope_covers_nothing() {
        let promo = Promotion::percentage("u", "U", Decimal::TEN).with_scope(Scope::Unknown, ["x"]);

        assert!(!Scope::Unknown.is_known());
        assert!(!promo.covers(&tee()));
    }

    #[test]
    fn unrecognised_enum_values_decode_to_unknown() -> Result<(), serde_norway::Error> {
        let scope: Scope = serde_norway::from_str("artist")?;
        let discount: DiscountType = serde_norway::from_str("buy_one_get_one")?;
        let trigger: TriggerType = serde_norway::from_str("scheduled")?;
        let site_wide: Scope = serde_norway::from_str("site-wide")?;

        assert_eq!(scope, Scope::Unknown);
        assert_eq!(discount, DiscountType::Unknown);
        assert_eq!(trigger, TriggerType::Unknown);
        assert_eq!(site_wide, Scope::SiteWide);

        Ok(())
    }
}
