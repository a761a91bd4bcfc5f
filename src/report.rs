//! Price Report

use std::io;

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::domain::{pricing::FinalPrice, products::models::Product};

/// Errors that can occur when building or writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Products and prices were not paired one-to-one.
    #[error("{products} products but {prices} prices")]
    LengthMismatch {
        /// Number of products supplied
        products: usize,

        /// Number of prices supplied
        prices: usize,
    },

    /// A column total does not fit in a `Decimal`.
    #[error("{0} total overflowed")]
    Overflow(&'static str),

    /// Writing the report failed.
    #[error("failed to write report")]
    Io(#[from] io::Error),
}

/// A product paired with the price it sells at.
#[derive(Debug, Clone)]
pub struct PricedProduct<'a> {
    /// The product as listed
    pub product: &'a Product,

    /// The calculated price
    pub price: FinalPrice,
}

impl PricedProduct<'_> {
    /// Amount saved against the base price.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.product.price - self.price.final_price
    }
}

/// Final prices for a list of products.
#[derive(Debug, Clone)]
pub struct PriceReport<'a> {
    rows: Vec<PricedProduct<'a>>,
}

impl<'a> PriceReport<'a> {
    /// Pair `products` with `prices` by position.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::LengthMismatch`] if the slices differ in length.
    pub fn new(products: &'a [Product], prices: Vec<FinalPrice>) -> Result<Self, ReportError> {
        if products.len() != prices.len() {
            return Err(ReportError::LengthMismatch {
                products: products.len(),
                prices: prices.len(),
            });
        }

        let rows = products
            .iter()
            .zip(prices)
            .map(|(product, price)| PricedProduct { product, price })
            .collect();

        Ok(Self { rows })
    }

    /// Rows in product order.
    #[must_use]
    pub fn rows(&self) -> &[PricedProduct<'a>] {
        &self.rows
    }

    /// Sum of base prices.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Overflow`] if the sum does not fit in a `Decimal`.
    pub fn subtotal(&self) -> Result<Decimal, ReportError> {
        checked_sum(self.rows.iter().map(|row| row.product.price), "subtotal")
    }

    /// Sum of final prices.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Overflow`] if the sum does not fit in a `Decimal`.
    pub fn total(&self) -> Result<Decimal, ReportError> {
        checked_sum(self.rows.iter().map(|row| row.price.final_price), "final price")
    }

    /// Number of products with a promotion applied.
    #[must_use]
    pub fn discounted_count(&self) -> usize {
        self.rows.iter().filter(|row| row.price.is_discounted()).count()
    }

    /// Writes the report table and summary.
    ///
    /// # Errors
    ///
    /// Returns an error if a total overflows or writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        let subtotal = self.subtotal()?;
        let total = self.total()?;

        let mut builder = Builder::default();

        builder.push_record([
            "Product No",
            "Name",
            "Base Price",
            "Final Price",
            "Savings",
            "Promotion",
        ]);

        for row in &self.rows {
            builder.push_record([
                row.product.product_no.clone(),
                row.product.name.clone(),
                format_amount(row.product.price),
                format_amount(row.price.final_price),
                format_amount(row.savings()),
                row.price.promotion_id.clone().unwrap_or_default(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "{table}")?;

        writeln!(
            out,
            " Subtotal: {}  Total: {}  Savings: {}  ({} of {} discounted)",
            format_amount(subtotal),
            format_amount(total),
            format_amount(subtotal - total),
            self.discounted_count(),
            self.rows.len(),
        )?;

        Ok(())
    }
}

fn checked_sum(
    mut amounts: impl Iterator<Item = Decimal>,
    column: &'static str,
) -> Result<Decimal, ReportError> {
    amounts.try_fold(Decimal::ZERO, |sum, amount| {
        sum.checked_add(amount).ok_or(ReportError::Overflow(column))
    })
}

/// Formats an amount with two decimal places.
fn format_amount(amount: Decimal) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn products() -> Result<Vec<Product>, crate::domain::validation::ValidationError> {
        Ok(vec![
            Product::new("SKU-100", "Linen Shirt", Decimal::ONE_HUNDRED)?,
            Product::new("SKU-200", "Wool Socks", Decimal::new(1250, 2))?,
        ])
    }

    fn prices() -> Vec<FinalPrice> {
        vec![
            FinalPrice {
                final_price: Decimal::from(80),
                promotion_id: Some("SPRING-20".to_string()),
            },
            FinalPrice::undiscounted(Decimal::new(1250, 2)),
        ]
    }

    #[test]
    fn totals_sum_base_and_final_prices() -> TestResult {
        let products = products()?;
        let report = PriceReport::new(&products, prices())?;

        assert_eq!(report.subtotal()?, Decimal::new(11250, 2));
        assert_eq!(report.total()?, Decimal::new(9250, 2));
        assert_eq!(report.discounted_count(), 1);
        assert_eq!(
            report.rows().first().map(PricedProduct::savings),
            Some(Decimal::from(20))
        );

        Ok(())
    }

    #[test]
    fn write_to_renders_rows_and_summary() -> TestResult {
        let products = products()?;
        let report = PriceReport::new(&products, prices())?;

        let mut out = Vec::new();
        report.write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("SKU-100"), "table lists products");
        assert!(rendered.contains("SPRING-20"), "table shows applied promotion");
        assert!(rendered.contains("80.00"), "final price has two decimals");
        assert!(rendered.contains("Savings: 20.00"), "summary shows total savings");
        assert!(rendered.contains("(1 of 2 discounted)"));

        Ok(())
    }

    #[test]
    fn new_rejects_mismatched_lengths() -> TestResult {
        let products = products()?;
        let result = PriceReport::new(&products, Vec::new());

        assert!(matches!(
            result,
            Err(ReportError::LengthMismatch {
                products: 2,
                prices: 0
            })
        ));

        Ok(())
    }

    #[test]
    fn totals_overflow_is_an_error_not_a_panic() -> TestResult {
        let products = vec![
            Product::new("SKU-1", "Huge", Decimal::MAX)?,
            Product::new("SKU-2", "Huger", Decimal::MAX)?,
        ];
        let prices = products
            .iter()
            .map(|product| FinalPrice::undiscounted(product.price))
            .collect();

        let report = PriceReport::new(&products, prices)?;

        assert!(matches!(report.subtotal(), Err(ReportError::Overflow(_))));
        assert!(matches!(report.write_to(Vec::new()), Err(ReportError::Overflow(_))));

        Ok(())
    }
}
