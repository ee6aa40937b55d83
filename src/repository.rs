//! Promotion Repository

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tracing::debug;

use crate::{fixtures::FixtureError, products::Product, promotions::Promotion};

/// Errors a promotion repository may report.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Backing store could not be reached.
    #[error("promotion store unavailable: {0}")]
    Unavailable(String),

    /// Promotion data could not be loaded.
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

/// Source of candidate promotions for a product.
///
/// Implementations return every promotion whose declared scope could cover the product. They
/// do not judge whether the promotion is active, in date or otherwise valid.
#[automock]
#[async_trait]
pub trait PromotionRepository: Send + Sync {
    /// Retrieve the promotions whose scope could apply to the product.
    async fn promotions_for_product(
        &self,
        product: &Product,
    ) -> Result<Vec<Promotion>, RepositoryError>;
}

/// Repository over an in-memory list of promotions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPromotionRepository {
    promotions: Vec<Promotion>,
}

impl InMemoryPromotionRepository {
    /// Create a repository holding the given promotions.
    pub fn new(promotions: Vec<Promotion>) -> Self {
        Self { promotions }
    }

    /// Every promotion held, in insertion order.
    pub fn promotions(&self) -> &[Promotion] {
        &self.promotions
    }

    /// Add a promotion.
    pub fn insert(&mut self, promotion: Promotion) {
        self.promotions.push(promotion);
    }
}

#[async_trait]
impl PromotionRepository for InMemoryPromotionRepository {
    async fn promotions_for_product(
        &self,
        product: &Product,
    ) -> Result<Vec<Promotion>, RepositoryError> {
        // Unknown scopes are passed through; eligibility rejects them.
        let candidates: Vec<Promotion> = self
            .promotions
            .iter()
            .filter(|promotion| !promotion.scope.is_known() || promotion.covers(product))
            .cloned()
            .collect();

        debug!(
            product_id = %product.id,
            candidates = candidates.len(),
            "loaded candidate promotions"
        );

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::EUR};
    use testresult::TestResult;

    use crate::promotions::{Scope, TriggerType};

    use super::*;

    fn repository() -> InMemoryPromotionRepository {
        InMemoryPromotionRepository::new(vec![
            Promotion::percentage("site", "Site", Decimal::TEN),
            Promotion::percentage("apparel", "Apparel", Decimal::TEN)
                .with_scope(Scope::Category, ["apparel"]),
            Promotion::percentage("prints", "Prints", Decimal::TEN)
                .with_scope(Scope::Category, ["prints"]),
            Promotion::percentage("artist", "Artist", Decimal::TEN)
                .with_scope(Scope::Unknown, ["someone"]),
            Promotion::fixed("code", "Code", Decimal::TEN).with_trigger(TriggerType::Code),
        ])
    }

    #[tokio::test]
    async fn returns_promotions_in_scope_without_judging_validity() -> TestResult {
        let product =
            Product::new("tee", "Tee", Money::from_minor(3000, EUR)).with_category("apparel");

        let candidates = repository().promotions_for_product(&product).await?;
        let ids: Vec<&str> = candidates.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, ["site", "apparel", "artist", "code"]);

        Ok(())
    }

    #[tokio::test]
    async fn insert_appends_promotions() -> TestResult {
        let mut repository = InMemoryPromotionRepository::default();

        repository.insert(Promotion::fixed("late", "Late", Decimal::ONE));

        let product = Product::new("any", "Any", Money::from_minor(100, EUR));
        let candidates = repository.promotions_for_product(&product).await?;

        assert_eq!(candidates.len(), 1);
        assert_eq!(repository.promotions().len(), 1);

        Ok(())
    }
}
