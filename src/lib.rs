//! Rebate
//!
//! Rebate decides which automatic promotions apply to a product, computes the discount they grant
//! and formats the outcome for display.

pub mod config;
pub mod discounts;
pub mod engine;
pub mod fixtures;
pub mod ids;
pub mod observability;
pub mod prelude;
pub mod products;
pub mod promotions;
pub mod report;
pub mod repository;
pub mod resolution;
pub mod results;
