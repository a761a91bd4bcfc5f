//! Promotion Fixtures

use jiff::Timestamp;
use serde::Deserialize;

use crate::{
    catalog::{FixtureError, products::parse_amount},
    domain::promotions::models::{Discount, Promotion, PromotionUuid, PromotionWindow},
};

/// Promotion entry in a catalog file
#[derive(Debug, Deserialize)]
pub struct PromotionFixture {
    /// Business-facing promotion identifier
    pub promotion_id: String,

    /// Discount configuration
    pub discount: DiscountFixture,

    /// Window start (RFC 3339)
    pub starts_at: Timestamp,

    /// Window end (RFC 3339)
    pub ends_at: Timestamp,

    /// Whether the promotion is switched on
    #[serde(default)]
    pub active: bool,

    /// Product numbers the promotion applies to
    #[serde(default)]
    pub products: Vec<String>,
}

/// Discount configuration from catalog files
#[derive(Debug, Deserialize)]
pub struct DiscountFixture {
    /// Discount type (`percentage` or `flat`)
    #[serde(rename = "type")]
    pub kind: String,

    /// Fraction for percentages (e.g. "0.20"), amount for flat discounts (e.g. "5.00")
    pub value: String,
}

impl PromotionFixture {
    /// Convert to a [`Promotion`] and the product numbers it is linked to.
    ///
    /// # Errors
    ///
    /// Returns an error if the discount or window is invalid.
    pub fn try_into_promotion(self) -> Result<(Promotion, Vec<String>), FixtureError> {
        let value = parse_amount(&self.discount.value)?;

        let invalid = |source| FixtureError::InvalidPromotion {
            promotion_id: self.promotion_id.clone(),
            source,
        };

        let discount = Discount::from_parts(&self.discount.kind, value).map_err(invalid)?;
        let window = PromotionWindow::new(self.starts_at, self.ends_at).map_err(invalid)?;

        let promotion = Promotion {
            uuid: PromotionUuid::new(),
            promotion_id: self.promotion_id,
            discount,
            window,
            active: self.active,
        };

        Ok((promotion, self.products))
    }
}
