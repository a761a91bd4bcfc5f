//! Final price calculator.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{Span, debug, info};

use crate::domain::{
    pricing::{
        PricingError,
        models::{FinalPrice, SelectionPolicy},
    },
    products::models::Product,
    promotions::{PromotionRepository, models::Promotion},
    validation::ValidationError,
};

/// Currency values are reported with two decimal places.
const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Computes the price a customer pays for a product.
#[derive(Clone)]
pub struct FinalPriceCalculator {
    promotions: Arc<dyn PromotionRepository>,
    policy: SelectionPolicy,
}

impl std::fmt::Debug for FinalPriceCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinalPriceCalculator")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl FinalPriceCalculator {
    /// Create a calculator using [`SelectionPolicy::FirstMatch`].
    #[must_use]
    pub fn new(promotions: Arc<dyn PromotionRepository>) -> Self {
        Self::with_policy(promotions, SelectionPolicy::default())
    }

    /// Create a calculator with an explicit selection policy.
    #[must_use]
    pub fn with_policy(promotions: Arc<dyn PromotionRepository>, policy: SelectionPolicy) -> Self {
        Self { promotions, policy }
    }

    /// The policy used when several promotions apply.
    #[must_use]
    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Price `product` as of now.
    ///
    /// # Errors
    ///
    /// See [`FinalPriceCalculator::calculate_final_price_at`].
    pub async fn calculate_final_price(
        &self,
        product: &Product,
    ) -> Result<FinalPrice, PricingError> {
        self.calculate_final_price_at(product, Timestamp::now()).await
    }

    /// Price `product` as of `point_in_time`.
    ///
    /// # Errors
    ///
    /// - [`PricingError::Validation`]: the product has a negative price or no product
    ///   number, or the selected promotion carries an out-of-range discount.
    /// - [`PricingError::DataAccess`]: the promotion lookup failed.
    #[tracing::instrument(
        name = "pricing.service.calculate_final_price",
        skip(self, product),
        fields(
            product_no = %product.product_no,
            policy = %self.policy,
            promotion_id = tracing::field::Empty
        ),
        err
    )]
    pub async fn calculate_final_price_at(
        &self,
        product: &Product,
        point_in_time: Timestamp,
    ) -> Result<FinalPrice, PricingError> {
        product.validate()?;

        let candidates = self
            .promotions
            .active_promotions_for_product(&product.product_no, point_in_time)
            .await?;

        let Some((promotion, final_price)) = self.select(product.price, &candidates)? else {
            debug!("no applicable promotions");

            return Ok(FinalPrice::undiscounted(to_currency(product.price)));
        };

        Span::current().record("promotion_id", promotion.promotion_id.as_str());

        info!(
            base_price = %product.price,
            %final_price,
            candidates = candidates.len(),
            "applied promotion"
        );

        Ok(FinalPrice {
            final_price,
            promotion_id: Some(promotion.promotion_id.clone()),
        })
    }

    /// Price each product independently as of `point_in_time`.
    ///
    /// Results are returned in input order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; see
    /// [`FinalPriceCalculator::calculate_final_price_at`].
    pub async fn calculate_final_prices_at(
        &self,
        products: &[Product],
        point_in_time: Timestamp,
    ) -> Result<Vec<FinalPrice>, PricingError> {
        let mut prices = Vec::with_capacity(products.len());

        for product in products {
            prices.push(self.calculate_final_price_at(product, point_in_time).await?);
        }

        Ok(prices)
    }

    fn select<'p>(
        &self,
        price: Decimal,
        candidates: &'p [Promotion],
    ) -> Result<Option<(&'p Promotion, Decimal)>, ValidationError> {
        match self.policy {
            SelectionPolicy::FirstMatch => candidates
                .first()
                .map(|promotion| {
                    discounted_price(price, promotion).map(|final_price| (promotion, final_price))
                })
                .transpose(),
            SelectionPolicy::BestDiscount => {
                let mut best: Option<(&Promotion, Decimal)> = None;

                for promotion in candidates {
                    promotion.discount.validate()?;

                    let discount = price - promotion.discount.apply(price);

                    if best.is_none_or(|(_, largest)| discount > largest) {
                        best = Some((promotion, discount));
                    }
                }

                best.map(|(promotion, _)| {
                    discounted_price(price, promotion).map(|final_price| (promotion, final_price))
                })
                .transpose()
            }
        }
    }
}

/// Apply `promotion` to `price`, rounding to currency precision and never going below zero.
fn discounted_price(price: Decimal, promotion: &Promotion) -> Result<Decimal, ValidationError> {
    promotion.discount.validate()?;

    Ok(to_currency(promotion.discount.apply(price)).max(Decimal::ZERO))
}

fn to_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
