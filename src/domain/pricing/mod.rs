//! Pricing
//!
//! Final price calculation: look up the promotions that apply to a product at a
//! point in time, pick one according to a [`SelectionPolicy`] and apply its discount.

mod errors;
pub mod models;
pub mod service;

pub use errors::PricingError;
pub use models::{FinalPrice, SelectionPolicy};
pub use service::FinalPriceCalculator;
