//! Storefront pricing command-line entry point

use std::{io, path::Path, process::ExitCode, sync::Arc};

use jiff::Timestamp;
use thiserror::Error;
use tracing::info;

use storefront_pricing::{
    catalog::{Catalog, FixtureError},
    database,
    domain::{
        pricing::{FinalPriceCalculator, PricingError},
        products::{PgProductsRepository, ProductsError, models::Product},
        promotions::{PgPromotionRepository, PromotionRepository},
    },
    report::{PriceReport, ReportError},
};

use crate::config::{Cli, Command, PriceArgs, source::Source};

mod config;
mod observability;

/// Products to price and the store their promotions come from.
type Loaded = (Vec<Product>, Arc<dyn PromotionRepository>);

/// Failures surfaced to the user before exiting non-zero.
#[derive(Debug, Error)]
enum CliError {
    #[error("either --catalog or --database-url (DATABASE_URL) is required")]
    MissingSource,

    #[error("product {0} not found")]
    ProductNotFound(String),

    #[error("failed to load catalog: {0}")]
    Catalog(#[from] FixtureError),

    #[error("failed to connect to database: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("failed to load products: {0}")]
    Products(#[from] ProductsError),

    #[error("failed to price products: {0}")]
    Pricing(#[from] PricingError),

    #[error("failed to write report: {0}")]
    Report(#[from] ReportError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(source) = observability::init(&cli.logging) {
        report_error(&source);

        return ExitCode::FAILURE;
    }

    let Command::Price(args) = cli.command;

    match price(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(source) => {
            report_error(&source);

            ExitCode::FAILURE
        }
    }
}

fn report_error(error: &dyn std::error::Error) {
    #[expect(
        clippy::print_stderr,
        reason = "errors must reach the user even when logging is filtered out"
    )]
    {
        eprintln!("error: {error}");
    }
}

async fn price(args: &PriceArgs) -> Result<(), CliError> {
    let at = args.at.unwrap_or_else(Timestamp::now);

    let (products, promotions) = match args.source().ok_or(CliError::MissingSource)? {
        Source::Catalog(path) => load_catalog(path, args.product_no.as_deref())?,
        Source::Database(url) => load_database(url, args.product_no.as_deref()).await?,
    };

    let calculator = FinalPriceCalculator::with_policy(promotions, args.pricing.policy);

    info!(
        products = products.len(),
        policy = %calculator.policy(),
        %at,
        "pricing products"
    );

    let prices = calculator.calculate_final_prices_at(&products, at).await?;

    PriceReport::new(&products, prices)?.write_to(io::stdout().lock())?;

    Ok(())
}

fn load_catalog(path: &Path, product_no: Option<&str>) -> Result<Loaded, CliError> {
    let catalog = Catalog::load(path)?;

    let products = match product_no {
        Some(product_no) => vec![
            catalog
                .product(product_no)
                .cloned()
                .ok_or_else(|| CliError::ProductNotFound(product_no.to_string()))?,
        ],
        None => catalog.products().to_vec(),
    };

    let promotions: Arc<dyn PromotionRepository> = Arc::new(catalog.promotions().clone());

    Ok((products, promotions))
}

async fn load_database(url: &str, product_no: Option<&str>) -> Result<Loaded, CliError> {
    let db = database::connect(url).await?;
    let repository = PgProductsRepository::new(db.clone());

    let products = match product_no {
        Some(product_no) => match repository.find_product(product_no).await {
            Ok(product) => vec![product],
            Err(ProductsError::NotFound) => {
                return Err(CliError::ProductNotFound(product_no.to_string()));
            }
            Err(source) => return Err(source.into()),
        },
        None => repository.list_products().await?,
    };

    let promotions: Arc<dyn PromotionRepository> = Arc::new(PgPromotionRepository::new(db));

    Ok((products, promotions))
}
