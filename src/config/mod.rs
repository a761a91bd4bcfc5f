//! Command-line configuration

use clap::{Args, Parser, Subcommand};
use jiff::Timestamp;

use crate::config::{
    logging::LoggingConfig,
    pricing::PricingConfig,
    source::{Source, SourceConfig},
};

pub(crate) mod logging;
pub(crate) mod pricing;
pub(crate) mod source;

/// Storefront pricing command-line interface
#[derive(Debug, Parser)]
#[command(
    name = "storefront-pricing",
    about = "Calculate final product prices from active promotions",
    long_about = None
)]
pub(crate) struct Cli {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Load configuration from `.env`, the environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Available commands
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print final prices for every product in a catalog or database.
    Price(PriceArgs),
}

/// Arguments for the `price` command
#[derive(Debug, Args)]
pub(crate) struct PriceArgs {
    /// Where products and promotions are read from.
    #[command(flatten)]
    pub source: SourceConfig,

    /// Promotion selection settings.
    #[command(flatten)]
    pub pricing: PricingConfig,

    /// Only price the product with this product number
    #[arg(long)]
    pub product_no: Option<String>,

    /// Price as of this RFC 3339 instant instead of now
    #[arg(long)]
    pub at: Option<Timestamp>,
}

impl PriceArgs {
    /// Resolved product and promotion source.
    pub fn source(&self) -> Option<Source<'_>> {
        self.source.resolve()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use testresult::TestResult;

    use storefront_pricing::domain::pricing::SelectionPolicy;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("storefront-pricing").chain(args.iter().copied()))
    }

    #[test]
    fn price_command_reads_catalog_and_policy() -> TestResult {
        let cli = parse(&[
            "price",
            "--catalog",
            "fixtures/catalogs/spring_sale.yml",
            "--policy",
            "best-discount",
            "--at",
            "2026-04-01T12:00:00Z",
        ])?;

        let Command::Price(args) = cli.command;

        assert_eq!(
            args.source.catalog,
            Some(PathBuf::from("fixtures/catalogs/spring_sale.yml"))
        );
        assert_eq!(args.pricing.policy, SelectionPolicy::BestDiscount);
        assert_eq!(args.at, Some("2026-04-01T12:00:00Z".parse()?));
        assert!(matches!(args.source(), Some(Source::Catalog(_))));

        Ok(())
    }

    #[test]
    fn invalid_timestamp_is_rejected() {
        let result = parse(&["price", "--catalog", "c.yml", "--at", "yesterday"]);

        assert!(result.is_err());
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let result = parse(&["price", "--catalog", "c.yml", "--policy", "cheapest"]);

        assert!(result.is_err());
    }
}
