//! Pricing Config

use clap::Args;

use storefront_pricing::domain::pricing::SelectionPolicy;

/// Promotion selection settings.
#[derive(Debug, Args)]
pub(crate) struct PricingConfig {
    /// Which applicable promotion wins when several match
    #[arg(
        long,
        env = "PRICING_SELECTION_POLICY",
        value_enum,
        default_value_t = SelectionPolicy::FirstMatch
    )]
    pub policy: SelectionPolicy,
}
