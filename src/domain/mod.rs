//! Storefront Pricing Domain Concerns

pub mod pricing;
pub mod products;
pub mod promotions;
pub mod validation;
