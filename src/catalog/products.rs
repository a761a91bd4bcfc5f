//! Product Fixtures

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{catalog::FixtureError, domain::products::models::Product};

/// Product entry in a catalog file
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product number promotions link to
    pub product_no: String,

    /// Product name
    pub name: String,

    /// Product price (e.g., "19.99")
    pub price: String,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price = parse_amount(&fixture.price)?;

        Product::new(fixture.product_no.clone(), fixture.name, price).map_err(|source| {
            FixtureError::InvalidProduct {
                product_no: fixture.product_no,
                source,
            }
        })
    }
}

/// Parse a decimal currency amount (e.g. "2.99").
///
/// # Errors
///
/// Returns [`FixtureError::InvalidAmount`] if the string is not a decimal number.
pub fn parse_amount(s: &str) -> Result<Decimal, FixtureError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidAmount(s.to_string()))
}
