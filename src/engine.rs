//! Promotion Engine
//!
//! Runs the promotion pipeline for products: repository lookup, eligibility filtering, priority
//! ordering, conflict resolution and result formatting.
//!
//! Promotions are an enhancement to pricing, never a precondition for it. Any failure to load
//! promotions for a product resolves that product to a result with no promotion applied.

use futures::future::join_all;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use tracing::{Span, debug, warn};

use crate::{
    products::{Product, ProductId},
    promotions::{Promotion, eligibility::eligible_promotions, priority::by_priority},
    repository::PromotionRepository,
    resolution::resolve,
    results::PromotionApplicationResult,
};

/// Resolve promotions for a product from already fetched candidates at `now`.
///
/// This is the synchronous core of the engine and never fails.
pub fn evaluate(
    product: &Product,
    candidates: &[Promotion],
    now: Timestamp,
) -> PromotionApplicationResult {
    let mut eligible = eligible_promotions(candidates, product, now);

    by_priority(&mut eligible);

    match resolve(product, &eligible) {
        Some(resolution) => PromotionApplicationResult::from_resolution(product, &resolution),
        None => PromotionApplicationResult::none(product),
    }
}

/// Promotion engine over a repository of candidate promotions.
#[derive(Debug, Clone)]
pub struct PromotionEngine<R> {
    repository: R,
}

impl<R: PromotionRepository> PromotionEngine<R> {
    /// Create an engine reading candidates from `repository`.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Resolve promotions for a single product as of now.
    pub async fn calculate_product_promotion(
        &self,
        product: &Product,
    ) -> PromotionApplicationResult {
        self.calculate_product_promotion_at(product, Timestamp::now()).await
    }

    /// Resolve promotions for a single product as of `now`.
    #[tracing::instrument(
        name = "promotions.engine.calculate_product_promotion",
        skip(self, product, now),
        fields(
            product_id = %product.id,
            %now,
            candidates = tracing::field::Empty,
            best_promotion = tracing::field::Empty
        )
    )]
    pub async fn calculate_product_promotion_at(
        &self,
        product: &Product,
        now: Timestamp,
    ) -> PromotionApplicationResult {
        let candidates = match self.repository.promotions_for_product(product).await {
            Ok(candidates) => candidates,
            Err(error) => {
                warn!(%error, "failed to load promotions; pricing without them");

                return PromotionApplicationResult::none(product);
            }
        };

        let span = Span::current();

        span.record("candidates", candidates.len());

        let result = evaluate(product, &candidates, now);

        if let Some(best) = result.best_promotion_id() {
            span.record("best_promotion", best);
        }

        debug!(
            has_promotion = result.has_promotion,
            discount_minor = result.discount_amount.to_minor_units(),
            badge = %result.badge,
            "resolved product promotion"
        );

        result
    }

    /// Resolve promotions for many products as of now.
    pub async fn calculate_product_promotions(
        &self,
        products: &[Product],
    ) -> FxHashMap<ProductId, PromotionApplicationResult> {
        self.calculate_product_promotions_at(products, Timestamp::now()).await
    }

    /// Resolve promotions for many products as of `now`.
    ///
    /// Products are evaluated concurrently and independently; one product failing to load
    /// promotions does not affect the others. When ids repeat, the last product wins.
    #[tracing::instrument(
        name = "promotions.engine.calculate_product_promotions",
        skip(self, products, now),
        fields(products = products.len(), %now)
    )]
    pub async fn calculate_product_promotions_at(
        &self,
        products: &[Product],
        now: Timestamp,
    ) -> FxHashMap<ProductId, PromotionApplicationResult> {
        let results = join_all(products.iter().map(|product| async move {
            (
                product.id.clone(),
                self.calculate_product_promotion_at(product, now).await,
            )
        }))
        .await;

        results.into_iter().collect()
    }

    /// Resolve promotions for a product and write the discounted price into its reduced price.
    ///
    /// Convenience adapter for callers that price from `reduced_price` directly. The product is
    /// left untouched when no promotion applies.
    pub async fn apply_to_product(&self, product: &mut Product) -> PromotionApplicationResult {
        let result = self.calculate_product_promotion(product).await;

        if result.has_promotion {
            product.reduced_price = Some(result.discounted_price);
        }

        result
    }
}
