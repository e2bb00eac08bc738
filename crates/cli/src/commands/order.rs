//! Quick order from the terminal.
//!
//! Builds the same order sheet the storefront uses and submits it through
//! one handoff channel. A failed clipboard write is reported with the order
//! text for manual copy and does not fail the command.

use std::path::PathBuf;

use clap::Args;
use sole_gifts_core::{Delivery, DraftField, Email, OrderSheet, SubmitOutcome};
use sole_gifts_storefront::config::{OrderChannel, OrderConfig, StorefrontConfig};
use sole_gifts_storefront::services::Handoff;
use tracing::{info, warn};

use super::{CommandError, resolve_catalog};

/// Arguments for `sole-cli order`.
#[derive(Debug, Args)]
pub struct OrderArgs {
    /// Product id, e.g. `classic-tea-1`
    pub product_id: String,

    /// Quantity as typed; anything below 1 or non-numeric becomes 1
    #[arg(short, long)]
    pub quantity: Option<String>,

    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Contact phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Delivery address
    #[arg(long)]
    pub address: Option<String>,

    /// Style, ribbon, color, or card text
    #[arg(long)]
    pub notes: Option<String>,

    /// Handoff channel (defaults to `ORDER_CHANNEL`, then clipboard)
    #[arg(long)]
    pub channel: Option<OrderChannel>,

    /// Order inbox for the email channel (defaults to `ORDER_EMAIL_RECIPIENT`)
    #[arg(long)]
    pub recipient: Option<Email>,

    /// YAML catalog file (defaults to `CATALOG_PATH`, then the sample catalog)
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,
}

impl OrderArgs {
    /// Field values given on the command line, in form order.
    fn fields(&self) -> Vec<(DraftField, &str)> {
        [
            (DraftField::Quantity, &self.quantity),
            (DraftField::Name, &self.name),
            (DraftField::Email, &self.email),
            (DraftField::Phone, &self.phone),
            (DraftField::Address, &self.address),
            (DraftField::Notes, &self.notes),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }

    /// Merge channel overrides into the configured defaults.
    fn order_config(&self, base: OrderConfig) -> OrderConfig {
        OrderConfig {
            channel: self.channel.unwrap_or(base.channel),
            recipient: self.recipient.clone().unwrap_or(base.recipient),
        }
    }
}

/// Build the order and hand it off.
///
/// # Errors
///
/// Returns an error if configuration or the catalog cannot be loaded, or the
/// product id is unknown. Handoff failures are reported, not returned.
pub async fn run(args: OrderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let catalog = resolve_catalog(args.catalog.as_deref())?;
    let product = catalog
        .get(&args.product_id)
        .ok_or_else(|| CommandError::UnknownProduct(args.product_id.clone()))?;

    let mut sheet = OrderSheet::default();
    sheet.open(product.clone(), catalog.currency());
    for (field, value) in args.fields() {
        sheet.update_field(field, value)?;
    }

    let order = args.order_config(config.order);
    info!(channel = %order.channel, product_id = %args.product_id, "Submitting order");
    let handoff = Handoff::from_config(&order);

    match sheet.submit(&handoff).await? {
        SubmitOutcome::Delivered { delivery, payload } => {
            info!("{}", delivery.notice().message);
            if let Delivery::Compose(link) = &delivery {
                info!("Compose link: {link}");
            }
            info!("Order details:\n{payload}");
        }
        outcome @ (SubmitOutcome::Failed { .. } | SubmitOutcome::Cancelled { .. }) => {
            warn!("{}", outcome.notice().message);
            warn!("Order details:\n{}", outcome.payload());
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        order: OrderArgs,
    }

    #[test]
    fn test_fields_skip_missing_values() {
        let cli = TestCli::parse_from([
            "sole-cli",
            "classic-tea-1",
            "-q",
            "2",
            "--name",
            "Jane Doe",
            "--notes",
            "Green ribbon",
        ]);
        let fields = cli.order.fields();
        assert_eq!(
            fields,
            vec![
                (DraftField::Quantity, "2"),
                (DraftField::Name, "Jane Doe"),
                (DraftField::Notes, "Green ribbon"),
            ]
        );
    }

    #[test]
    fn test_channel_and_recipient_overrides() {
        let cli = TestCli::parse_from([
            "sole-cli",
            "classic-tea-1",
            "--channel",
            "email",
            "--recipient",
            "hello@solegifts.example",
        ]);
        let order = cli.order.order_config(OrderConfig::default());
        assert_eq!(order.channel, OrderChannel::Email);
        assert_eq!(order.recipient.as_str(), "hello@solegifts.example");
    }

    #[test]
    fn test_rejects_invalid_recipient() {
        let result = TestCli::try_parse_from([
            "sole-cli",
            "classic-tea-1",
            "--recipient",
            "not-an-email",
        ]);
        assert!(result.is_err());
    }
}
