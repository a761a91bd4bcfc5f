//! Promotion Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::validation::ValidationError;

pub use crate::uuids::PromotionUuid;

/// Textual discount discriminant used in storage and fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountKind {
    /// Multiplicative reduction.
    Percentage,

    /// Subtractive reduction.
    Flat,
}

impl DiscountKind {
    /// Storage name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Flat => "flat",
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(Self::Percentage),
            "flat" => Ok(Self::Flat),
            other => Err(ValidationError::UnknownDiscountType(other.to_string())),
        }
    }
}

/// The pricing rule a promotion applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discount {
    /// Take this fraction (e.g. `0.2` for 20%) off the price.
    Percentage(Decimal),

    /// Take this currency amount off the price.
    Flat(Decimal),
}

impl Discount {
    /// Build a discount from its storage representation.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::UnknownDiscountType`]: `kind` is neither `percentage` nor `flat`.
    /// - [`ValidationError::PercentageOutOfRange`] / [`ValidationError::NegativeFlatAmount`]:
    ///   the value is not valid for the kind.
    pub fn from_parts(kind: &str, value: Decimal) -> Result<Self, ValidationError> {
        let discount = match kind.parse::<DiscountKind>()? {
            DiscountKind::Percentage => Self::Percentage(value),
            DiscountKind::Flat => Self::Flat(value),
        };

        discount.validate()?;

        Ok(discount)
    }

    /// The discriminant of this discount.
    #[must_use]
    pub const fn kind(&self) -> DiscountKind {
        match self {
            Self::Percentage(_) => DiscountKind::Percentage,
            Self::Flat(_) => DiscountKind::Flat,
        }
    }

    /// The raw discount value (fraction or amount).
    #[must_use]
    pub const fn value(&self) -> Decimal {
        match self {
            Self::Percentage(value) | Self::Flat(value) => *value,
        }
    }

    /// Check the value is in range for the kind.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PercentageOutOfRange`] for fractions outside `[0, 1]`
    /// and [`ValidationError::NegativeFlatAmount`] for negative flat amounts.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match *self {
            Self::Percentage(fraction) if fraction < Decimal::ZERO || fraction > Decimal::ONE => {
                Err(ValidationError::PercentageOutOfRange(fraction))
            }
            Self::Flat(amount) if amount < Decimal::ZERO => {
                Err(ValidationError::NegativeFlatAmount(amount))
            }
            Self::Percentage(_) | Self::Flat(_) => Ok(()),
        }
    }

    /// Apply the discount to `price`, without rounding or flooring.
    #[must_use]
    pub fn apply(&self, price: Decimal) -> Decimal {
        match *self {
            Self::Percentage(fraction) => price * (Decimal::ONE - fraction),
            Self::Flat(amount) => price - amount,
        }
    }
}

/// Inclusive range of instants during which a promotion is eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionWindow {
    starts_at: Timestamp,
    ends_at: Timestamp,
}

impl PromotionWindow {
    /// Create a window.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidWindow`] when `ends_at` precedes `starts_at`.
    pub fn new(starts_at: Timestamp, ends_at: Timestamp) -> Result<Self, ValidationError> {
        if ends_at < starts_at {
            return Err(ValidationError::InvalidWindow { starts_at, ends_at });
        }

        Ok(Self { starts_at, ends_at })
    }

    /// Window start (inclusive).
    #[must_use]
    pub const fn starts_at(&self) -> Timestamp {
        self.starts_at
    }

    /// Window end (inclusive).
    #[must_use]
    pub const fn ends_at(&self) -> Timestamp {
        self.ends_at
    }

    /// Whether `at` falls within the window, bounds included.
    #[must_use]
    pub fn contains(&self, at: Timestamp) -> bool {
        self.starts_at <= at && at <= self.ends_at
    }
}

/// Promotion
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion {
    /// Internal key.
    pub uuid: PromotionUuid,

    /// Business-facing identifier returned to callers.
    pub promotion_id: String,

    /// Pricing rule.
    pub discount: Discount,

    /// Eligibility window.
    pub window: PromotionWindow,

    /// Promotions must be explicitly activated.
    pub active: bool,
}

impl Promotion {
    /// Whether the promotion is active and `at` lies inside its window.
    #[must_use]
    pub fn is_applicable_at(&self, at: Timestamp) -> bool {
        self.active && self.window.contains(at)
    }
}
