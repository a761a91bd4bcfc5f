//! Catalog Fixtures
//!
//! YAML catalog files describing products, promotions and the links between them.
//! A loaded [`Catalog`] prices through an [`InMemoryPromotionRepository`].

use std::{fs, path::Path};

use rustc_hash::FxHashSet;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::{
    catalog::{products::ProductFixture, promotions::PromotionFixture},
    domain::{
        products::models::Product,
        promotions::{DataAccessError, InMemoryPromotionRepository},
        validation::ValidationError,
    },
};

pub mod products;
pub mod promotions;

/// Catalog Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid decimal amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Product failed validation
    #[error("Invalid product {product_no}: {source}")]
    InvalidProduct {
        /// Product number of the offending entry
        product_no: String,

        /// Validation failure
        source: ValidationError,
    },

    /// Promotion failed validation
    #[error("Invalid promotion {promotion_id}: {source}")]
    InvalidPromotion {
        /// Promotion identifier of the offending entry
        promotion_id: String,

        /// Validation failure
        source: ValidationError,
    },

    /// Two products share a product number
    #[error("Duplicate product number: {0}")]
    DuplicateProduct(String),

    /// Promotion links to a product number not in the catalog
    #[error("Promotion {promotion_id} references unknown product {product_no}")]
    ProductNotFound {
        /// Promotion identifier
        promotion_id: String,

        /// Missing product number
        product_no: String,
    },

    /// Promotion store could not be populated
    #[error(transparent)]
    Store(#[from] DataAccessError),
}

/// Top-level shape of a catalog file
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products, in display order
    #[serde(default)]
    pub products: Vec<ProductFixture>,

    /// Promotions, in lookup order
    #[serde(default)]
    pub promotions: Vec<PromotionFixture>,
}

/// Products and promotions loaded from a catalog file
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    promotions: InMemoryPromotionRepository,
}

impl Catalog {
    /// Load a catalog from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any entry is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_yaml(&contents)?;

        info!(
            path = %path.display(),
            products = catalog.products.len(),
            "loaded catalog"
        );

        Ok(catalog)
    }

    /// Parse a catalog from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, an amount, discount or window is
    /// invalid, a product number is duplicated, or a promotion links to an unknown product.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        let mut known = FxHashSet::default();
        let mut products = Vec::with_capacity(fixture.products.len());

        for product_fixture in fixture.products {
            let product = Product::try_from(product_fixture)?;

            if !known.insert(product.product_no.clone()) {
                return Err(FixtureError::DuplicateProduct(product.product_no));
            }

            products.push(product);
        }

        let promotions = InMemoryPromotionRepository::new();

        for promotion_fixture in fixture.promotions {
            let (promotion, product_nos) = promotion_fixture.try_into_promotion()?;

            if let Some(missing) = product_nos.iter().find(|no| !known.contains(no.as_str())) {
                return Err(FixtureError::ProductNotFound {
                    promotion_id: promotion.promotion_id,
                    product_no: missing.clone(),
                });
            }

            promotions.insert(promotion, product_nos)?;
        }

        Ok(Self {
            products,
            promotions,
        })
    }

    /// Products in catalog order
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by product number
    #[must_use]
    pub fn product(&self, product_no: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.product_no == product_no)
    }

    /// Promotion store holding the catalog's promotions
    #[must_use]
    pub fn promotions(&self) -> &InMemoryPromotionRepository {
        &self.promotions
    }
}
