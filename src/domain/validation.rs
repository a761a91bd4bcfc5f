//! Input validation errors shared by products, promotions and pricing.

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

/// A product, promotion or discount that cannot be priced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Product price below zero.
    #[error("product price must not be negative, got {0}")]
    NegativePrice(Decimal),

    /// Product number is empty, so no promotions can be looked up.
    #[error("product number is missing")]
    MissingProductNumber,

    /// Discount kind other than `percentage` or `flat`.
    #[error("unknown discount type `{0}`")]
    UnknownDiscountType(String),

    /// Percentage discounts are fractions in `[0, 1]`.
    #[error("percentage discount must be between 0 and 1, got {0}")]
    PercentageOutOfRange(Decimal),

    /// Flat discounts are non-negative currency amounts.
    #[error("flat discount must not be negative, got {0}")]
    NegativeFlatAmount(Decimal),

    /// Promotion window ends before it starts.
    #[error("promotion window ends ({ends_at}) before it starts ({starts_at})")]
    InvalidWindow {
        /// Window start.
        starts_at: Timestamp,

        /// Window end.
        ends_at: Timestamp,
    },
}
