//! Promotion lookup errors.

use thiserror::Error;

use crate::domain::validation::ValidationError;

/// The promotion store could not answer a lookup.
#[derive(Debug, Error)]
pub enum DataAccessError {
    /// Underlying database error.
    #[error("storage error")]
    Sql(#[from] sqlx::Error),

    /// The store is unreachable or in an unusable state.
    #[error("promotion store unavailable: {0}")]
    Unavailable(String),

    /// A stored promotion could not be turned into a valid [`Promotion`](super::models::Promotion).
    #[error("invalid promotion record `{promotion_id}`")]
    InvalidRecord {
        /// Business identifier of the offending promotion.
        promotion_id: String,

        /// Why the record was rejected.
        #[source]
        source: ValidationError,
    },
}
