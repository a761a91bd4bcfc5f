//! Product Models

use rust_decimal::Decimal;

use crate::domain::validation::ValidationError;

pub use crate::uuids::ProductUuid;

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Internal key.
    pub uuid: ProductUuid,

    /// Natural key promotions are linked by.
    pub product_no: String,

    /// Display name.
    pub name: String,

    /// Base price in the store currency.
    pub price: Decimal,
}

impl Product {
    /// Create a product with a freshly generated key.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingProductNumber`] for a blank product number and
    /// [`ValidationError::NegativePrice`] for a price below zero.
    pub fn new(
        product_no: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, ValidationError> {
        let product = Self {
            uuid: ProductUuid::new(),
            product_no: product_no.into(),
            name: name.into(),
            price,
        };

        product.validate()?;

        Ok(product)
    }

    /// Check the fields pricing depends on.
    ///
    /// # Errors
    ///
    /// See [`Product::new`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.product_no.trim().is_empty() {
            return Err(ValidationError::MissingProductNumber);
        }

        if self.price < Decimal::ZERO {
            return Err(ValidationError::NegativePrice(self.price));
        }

        Ok(())
    }
}
