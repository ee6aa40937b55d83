//! Report
//!
//! Tabular rendering of promotion results for the command line.

use std::io;

use rust_decimal::RoundingStrategy;
use rustc_hash::FxHashMap;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    products::{Product, ProductId},
    results::PromotionApplicationResult,
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Write one row per product, in the order given.
///
/// Products without a result are reported at their base price.
///
/// # Errors
///
/// Returns a [`ReportError`] if writing to `out` fails.
pub fn write_report(
    mut out: impl io::Write,
    products: &[Product],
    results: &FxHashMap<ProductId, PromotionApplicationResult>,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record([
        "Product",
        "Base Price",
        "Final Price",
        "Savings",
        "%",
        "Badge",
        "Promotions",
        "Message",
    ]);

    for product in products {
        let fallback;

        let result = if let Some(result) = results.get(&product.id) {
            result
        } else {
            fallback = PromotionApplicationResult::none(product);
            &fallback
        };

        builder.push_record(row(product, result));
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..5), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| ReportError::IO)
}

fn row(product: &Product, result: &PromotionApplicationResult) -> [String; 8] {
    let promotions = result
        .all_promotions
        .iter()
        .map(|promotion| promotion.id.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let percentage = result
        .discount_percentage
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    [
        product.name.clone(),
        result.original_price.to_string(),
        result.discounted_price.to_string(),
        result.discount_amount.to_string(),
        percentage.to_string(),
        result.badge.clone(),
        promotions,
        result.message.clone(),
    ]
}
