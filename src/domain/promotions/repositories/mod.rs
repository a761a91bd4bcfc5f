//! Promotion Repositories

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::domain::promotions::{DataAccessError, models::Promotion};

mod memory;
mod postgres;

pub use memory::InMemoryPromotionRepository;
pub use postgres::PgPromotionRepository;

/// Read-only lookup of the promotions that currently apply to a product.
#[automock]
#[async_trait]
pub trait PromotionRepository: Send + Sync {
    /// Promotions linked to `product_no` that are active and whose window contains
    /// `point_in_time`, in a stable order.
    ///
    /// # Errors
    ///
    /// Returns a [`DataAccessError`] when the underlying store cannot be queried.
    async fn active_promotions_for_product(
        &self,
        product_no: &str,
        point_in_time: Timestamp,
    ) -> Result<Vec<Promotion>, DataAccessError>;
}
