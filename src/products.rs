//! Products

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::ids::TypedId;

/// Monetary amount in a fixed ISO currency.
pub type Price = Money<'static, Currency>;

/// Product Id
pub type ProductId = TypedId<Product>;

/// Price-bearing view of a catalog product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Category the product is filed under
    pub category_id: Option<String>,

    /// Subcategory the product is filed under
    pub subcategory_id: Option<String>,

    /// Sizes the product is offered in
    pub sizes: SmallVec<[String; 4]>,

    /// List price
    pub original_price: Price,

    /// Price already lowered by some other mechanism, such as a manual markdown
    pub reduced_price: Option<Price>,
}

impl Product {
    /// Create an uncategorised product with a list price.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, original_price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category_id: None,
            subcategory_id: None,
            sizes: SmallVec::new(),
            original_price,
            reduced_price: None,
        }
    }

    /// Set the category and return the product.
    #[must_use]
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Set the subcategory and return the product.
    #[must_use]
    pub fn with_subcategory(mut self, subcategory_id: impl Into<String>) -> Self {
        self.subcategory_id = Some(subcategory_id.into());
        self
    }

    /// Add an available size and return the product.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.sizes.push(size.into());
        self
    }

    /// Set the reduced price and return the product.
    #[must_use]
    pub fn with_reduced_price(mut self, reduced_price: Price) -> Self {
        self.reduced_price = Some(reduced_price);
        self
    }

    /// The price promotions are calculated from: the reduced price when set, else the list price.
    pub fn base_price(&self) -> Price {
        self.reduced_price.unwrap_or(self.original_price)
    }

    /// Whether the product already carries a reduced price.
    pub fn is_reduced(&self) -> bool {
        self.reduced_price.is_some()
    }

    /// Currency of the price promotions are calculated from.
    pub fn currency(&self) -> &'static Currency {
        self.base_price().currency()
    }
}
