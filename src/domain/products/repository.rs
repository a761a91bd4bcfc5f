//! Products Repository

use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::Db,
    domain::products::{
        ProductsError,
        models::{Product, ProductUuid},
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const FIND_PRODUCT_SQL: &str = include_str!("sql/find_product.sql");

/// Read access to the `products` table.
#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    db: Db,
}

impl PgProductsRepository {
    /// Create a repository over an existing database handle.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// All products, ordered by product number.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsError::Sql`] if the query fails and
    /// [`ProductsError::InvalidRecord`] if a stored product is invalid.
    #[tracing::instrument(name = "products.repository.list_products", skip(self), err)]
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductsError> {
        let products = query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(self.db.pool())
            .await?;

        for product in &products {
            product.validate()?;
        }

        Ok(products)
    }

    /// The product with the given product number.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsError::NotFound`] when no product matches.
    #[tracing::instrument(name = "products.repository.find_product", skip(self), err)]
    pub async fn find_product(&self, product_no: &str) -> Result<Product, ProductsError> {
        let product = query_as::<Postgres, Product>(FIND_PRODUCT_SQL)
            .bind(product_no)
            .fetch_one(self.db.pool())
            .await?;

        product.validate()?;

        Ok(product)
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<ProductUuid, _>("uuid")?,
            product_no: row.try_get("product_no")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
        })
    }
}
