//! In-memory promotion store backing catalogs and tests.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::domain::promotions::{
    DataAccessError, models::Promotion, repositories::PromotionRepository,
};

#[derive(Debug, Clone)]
struct LinkedPromotion {
    promotion: Promotion,
    product_nos: FxHashSet<String>,
}

/// Promotion store held in process memory.
///
/// Lookups return promotions in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPromotionRepository {
    promotions: Arc<RwLock<Vec<LinkedPromotion>>>,
}

impl InMemoryPromotionRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with promotions and the product numbers they apply to.
    ///
    /// # Errors
    ///
    /// Returns [`DataAccessError::Unavailable`] if the store lock is poisoned.
    pub fn with_promotions<I, P, S>(promotions: I) -> Result<Self, DataAccessError>
    where
        I: IntoIterator<Item = (Promotion, P)>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let repository = Self::new();

        for (promotion, product_nos) in promotions {
            repository.insert(promotion, product_nos)?;
        }

        Ok(repository)
    }

    /// Add a promotion linked to the given product numbers.
    ///
    /// # Errors
    ///
    /// Returns [`DataAccessError::Unavailable`] if the store lock is poisoned.
    pub fn insert<P, S>(&self, promotion: Promotion, product_nos: P) -> Result<(), DataAccessError>
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut promotions = self
            .promotions
            .write()
            .map_err(|e| {
                DataAccessError::Unavailable(format!("failed to acquire write lock: {e}"))
            })?;

        promotions.push(LinkedPromotion {
            promotion,
            product_nos: product_nos.into_iter().map(Into::into).collect(),
        });

        Ok(())
    }

    /// Number of stored promotions, applicable or not.
    ///
    /// # Errors
    ///
    /// Returns [`DataAccessError::Unavailable`] if the store lock is poisoned.
    pub fn len(&self) -> Result<usize, DataAccessError> {
        let promotions = self
            .promotions
            .read()
            .map_err(|e| {
                DataAccessError::Unavailable(format!("failed to acquire read lock: {e}"))
            })?;

        Ok(promotions.len())
    }

    /// Whether the store holds no promotions.
    ///
    /// # Errors
    ///
    /// Returns [`DataAccessError::Unavailable`] if the store lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, DataAccessError> {
        self.len().map(|len| len == 0)
    }
}

#[async_trait]
impl PromotionRepository for InMemoryPromotionRepository {
    async fn active_promotions_for_product(
        &self,
        product_no: &str,
        point_in_time: Timestamp,
    ) -> Result<Vec<Promotion>, DataAccessError> {
        let promotions = self
            .promotions
            .read()
            .map_err(|e| {
                DataAccessError::Unavailable(format!("failed to acquire read lock: {e}"))
            })?;

        let applicable: Vec<Promotion> = promotions
            .iter()
            .filter(|linked| linked.product_nos.contains(product_no))
            .filter(|linked| linked.promotion.is_applicable_at(point_in_time))
            .map(|linked| linked.promotion.clone())
            .collect();

        debug!(
            product_no,
            candidates = applicable.len(),
            "looked up in-memory promotions"
        );

        Ok(applicable)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use jiff::ToSpan;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::domain::promotions::models::{Discount, PromotionUuid, PromotionWindow};

    use super::*;

    fn promotion(id: &str, active: bool, window: PromotionWindow) -> Promotion {
        Promotion {
            uuid: PromotionUuid::new(),
            promotion_id: id.to_string(),
            discount: Discount::Flat(Decimal::ONE),
            window,
            active,
        }
    }

    fn window_around(at: Timestamp) -> Result<PromotionWindow, Box<dyn std::error::Error>> {
        Ok(PromotionWindow::new(
            at.checked_sub(1.hour())?,
            at.checked_add(1.hour())?,
        )?)
    }

    #[tokio::test]
    async fn returns_only_linked_active_in_window_promotions() -> TestResult {
        let now = Timestamp::from_second(1_750_000_000)?;

        let expired =
            PromotionWindow::new(now.checked_sub(48.hours())?, now.checked_sub(24.hours())?)?;

        let upcoming =
            PromotionWindow::new(now.checked_add(24.hours())?, now.checked_add(48.hours())?)?;

        let repository = InMemoryPromotionRepository::with_promotions([
            (promotion("LIVE", true, window_around(now)?), vec!["SKU-1"]),
            (promotion("PAUSED", false, window_around(now)?), vec!["SKU-1"]),
            (promotion("EXPIRED", true, expired), vec!["SKU-1"]),
            (promotion("UPCOMING", true, upcoming), vec!["SKU-1"]),
            (promotion("OTHER", true, window_around(now)?), vec!["SKU-2"]),
        ])?;

        let found = repository.active_promotions_for_product("SKU-1", now).await?;
        let ids: Vec<&str> = found.iter().map(|p| p.promotion_id.as_str()).collect();

        assert_eq!(ids, vec!["LIVE"]);
        assert_eq!(repository.len()?, 5);

        Ok(())
    }

    #[tokio::test]
    async fn preserves_insertion_order() -> TestResult {
        let now = Timestamp::from_second(1_750_000_000)?;

        let repository = InMemoryPromotionRepository::new();

        for id in ["B", "A", "C"] {
            repository.insert(promotion(id, true, window_around(now)?), ["SKU-1"])?;
        }

        let found = repository.active_promotions_for_product("SKU-1", now).await?;
        let ids: Vec<&str> = found.iter().map(|p| p.promotion_id.as_str()).collect();

        assert_eq!(ids, vec!["B", "A", "C"]);

        Ok(())
    }

    #[tokio::test]
    async fn empty_store_returns_no_promotions() -> TestResult {
        let repository = InMemoryPromotionRepository::new();

        let found = repository
            .active_promotions_for_product("SKU-1", Timestamp::now())
            .await?;

        assert!(found.is_empty());
        assert!(repository.is_empty()?);

        Ok(())
    }

    #[tokio::test]
    async fn poisoned_lock_surfaces_as_unavailable() {
        let repository = InMemoryPromotionRepository::new();
        let poisoner = repository.clone();

        let _join = thread::spawn(move || {
            let _guard = poisoner.promotions.write();
            std::panic::panic_any("poison the store lock");
        })
        .join();

        let result = repository
            .active_promotions_for_product("SKU-1", Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(DataAccessError::Unavailable(_))),
            "expected Unavailable, got {result:?}"
        );
    }
}
