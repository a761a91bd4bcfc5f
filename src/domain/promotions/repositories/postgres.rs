//! `PostgreSQL` promotion store.

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{Postgres, Row, postgres::PgRow, query};
use tracing::debug;

use crate::{
    database::Db,
    domain::promotions::{
        DataAccessError,
        models::{Discount, Promotion, PromotionUuid, PromotionWindow},
        repositories::PromotionRepository,
    },
};

const ACTIVE_PROMOTIONS_FOR_PRODUCT_SQL: &str =
    include_str!("sql/active_promotions_for_product.sql");

/// Promotion store backed by the `promotions` and `promotion_products` tables.
#[derive(Debug, Clone)]
pub struct PgPromotionRepository {
    db: Db,
}

impl PgPromotionRepository {
    /// Create a repository over an existing database handle.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PromotionRepository for PgPromotionRepository {
    #[tracing::instrument(
        name = "promotions.repository.active_promotions_for_product",
        skip(self),
        fields(candidates = tracing::field::Empty),
        err
    )]
    async fn active_promotions_for_product(
        &self,
        product_no: &str,
        point_in_time: Timestamp,
    ) -> Result<Vec<Promotion>, DataAccessError> {
        let rows = query::<Postgres>(ACTIVE_PROMOTIONS_FOR_PRODUCT_SQL)
            .bind(product_no)
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_all(self.db.pool())
            .await?;

        let promotions = rows
            .iter()
            .map(promotion_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::Span::current().record("candidates", promotions.len());

        debug!(product_no, candidates = promotions.len(), "looked up promotions");

        Ok(promotions)
    }
}

fn promotion_from_row(row: &PgRow) -> Result<Promotion, DataAccessError> {
    let promotion_id: String = row.try_get("promotion_id")?;
    let discount_type: String = row.try_get("discount_type")?;
    let discount_value: Decimal = row.try_get("discount_value")?;
    let starts_at = row.try_get::<SqlxTimestamp, _>("starts_at")?.to_jiff();
    let ends_at = row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff();

    let invalid = |source| DataAccessError::InvalidRecord {
        promotion_id: promotion_id.clone(),
        source,
    };

    let discount = Discount::from_parts(&discount_type, discount_value).map_err(invalid)?;
    let window = PromotionWindow::new(starts_at, ends_at).map_err(invalid)?;

    Ok(Promotion {
        uuid: row.try_get::<PromotionUuid, _>("uuid")?,
        promotion_id,
        discount,
        window,
        active: row.try_get("active")?,
    })
}
