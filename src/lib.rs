//! Storefront Pricing
//!
//! Final price calculation for storefront products. A [`FinalPriceCalculator`] asks a
//! [`PromotionRepository`] for the promotions applicable to a product at a point in time,
//! picks one and applies its percentage or flat discount to the product's base price.
//!
//! Promotions can be served from `PostgreSQL` ([`PgPromotionRepository`]) or from a YAML
//! catalog loaded into memory ([`catalog::Catalog`]).
//!
//! [`FinalPriceCalculator`]: domain::pricing::FinalPriceCalculator
//! [`PromotionRepository`]: domain::promotions::PromotionRepository
//! [`PgPromotionRepository`]: domain::promotions::PgPromotionRepository

pub mod catalog;
pub mod database;
pub mod domain;
pub mod report;
pub mod uuids;
