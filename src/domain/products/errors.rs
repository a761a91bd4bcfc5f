//! Products repository errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::validation::ValidationError;

/// Errors raised while reading products.
#[derive(Debug, Error)]
pub enum ProductsError {
    /// No product with the requested product number.
    #[error("product not found")]
    NotFound,

    /// A stored product violates the product invariants.
    #[error("invalid product record")]
    InvalidRecord(#[from] ValidationError),

    /// Underlying database error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ProductsError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
