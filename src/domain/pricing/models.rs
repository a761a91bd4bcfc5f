//! Pricing Models

use std::fmt;

use rust_decimal::Decimal;

/// How one promotion is chosen when several apply to the same product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SelectionPolicy {
    /// The first promotion returned by the lookup wins.
    #[default]
    FirstMatch,

    /// The promotion producing the lowest final price wins; ties go to the
    /// earlier promotion.
    BestDiscount,
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FirstMatch => "first-match",
            Self::BestDiscount => "best-discount",
        })
    }
}

/// Result of pricing a single product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalPrice {
    /// Price after the winning discount, rounded to two decimal places.
    pub final_price: Decimal,

    /// Business identifier of the applied promotion, if any.
    pub promotion_id: Option<String>,
}

impl FinalPrice {
    /// A price with no promotion applied.
    #[must_use]
    pub fn undiscounted(price: Decimal) -> Self {
        Self {
            final_price: price,
            promotion_id: None,
        }
    }

    /// Whether a promotion was applied.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.promotion_id.is_some()
    }
}
