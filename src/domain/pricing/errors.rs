//! Pricing errors.

use thiserror::Error;

use crate::domain::{promotions::DataAccessError, validation::ValidationError};

/// Errors that can occur while calculating a final price.
#[derive(Debug, Error)]
pub enum PricingError {
    /// The promotion lookup failed; surfaced unchanged.
    #[error(transparent)]
    DataAccess(#[from] DataAccessError),

    /// The product or the selected discount cannot be priced.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
