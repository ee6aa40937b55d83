//! Fixtures
//!
//! YAML catalogs of products and promotions, used to seed an in-memory repository.

use std::{fs, path::Path};

use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    fixtures::{products::ProductFixture, promotions::PromotionFixture},
    products::Product,
    promotions::Promotion,
    repository::InMemoryPromotionRepository,
};

pub mod products;
pub mod promotions;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Two entries share an id
    #[error("Duplicate id: {0}")]
    DuplicateId(String),
}

/// Wrapper for a catalog in YAML
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    #[serde(default)]
    products: Vec<ProductFixture>,

    #[serde(default)]
    promotions: Vec<PromotionFixture>,
}

/// Products and promotions loaded from a fixture.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    promotions: Vec<Promotion>,
}

impl Catalog {
    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Parse a catalog from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, a price is malformed, products are priced
    /// in more than one currency, or ids repeat.
    pub fn from_yaml_str(contents: &str) -> Result<Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;

        let mut currency: Option<&'static Currency> = None;
        let mut products: Vec<Product> = Vec::with_capacity(fixture.products.len());

        for product_fixture in fixture.products {
            if products.iter().any(|p| p.id.as_str() == product_fixture.id) {
                return Err(FixtureError::DuplicateId(product_fixture.id));
            }

            let product = Product::try_from(product_fixture)?;
            let product_currency = product.original_price.currency();

            match currency {
                Some(existing) if existing != product_currency => {
                    return Err(FixtureError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        product_currency.iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => currency = Some(product_currency),
            }

            products.push(product);
        }

        let mut promotions: Vec<Promotion> = Vec::with_capacity(fixture.promotions.len());

        for promotion_fixture in fixture.promotions {
            if promotions.iter().any(|p| p.id.as_str() == promotion_fixture.id) {
                return Err(FixtureError::DuplicateId(promotion_fixture.id));
            }

            promotions.push(promotion_fixture.into());
        }

        Ok(Self {
            products,
            promotions,
        })
    }

    /// Products in fixture order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Promotions in fixture order.
    pub fn promotions(&self) -> &[Promotion] {
        &self.promotions
    }

    /// Split into products and a repository holding the promotions.
    pub fn into_parts(self) -> (Vec<Product>, InMemoryPromotionRepository) {
        (
            self.products,
            InMemoryPromotionRepository::new(self.promotions),
        )
    }
}
