//! Sole Gifts CLI - catalog inspection and quick orders from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List every gift box
//! sole-cli catalog list
//!
//! # List boxes carrying a tag, from a custom catalog file
//! sole-cli catalog list --tag Holiday --catalog catalog.yaml
//!
//! # Show the tag filters
//! sole-cli catalog tags
//!
//! # Quick order, copied to the clipboard
//! sole-cli order classic-tea-1 -q 2 --name "Jane Doe" --email jane@example.com \
//!     --address "1 Main St" --notes "Green ribbon"
//!
//! # Quick order as a mailto link
//! sole-cli order chocolate-delight-1 --channel email --name Jane --email jane@example.com
//! ```
//!
//! # Commands
//!
//! - `catalog list` - List products, optionally filtered by tag
//! - `catalog tags` - List the tag universe
//! - `order` - Build an order draft and hand it to a channel

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::order::OrderArgs;

#[derive(Parser)]
#[command(name = "sole-cli")]
#[command(author, version, about = "Sole Gifts Co. CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Build a quick order and hand it off
    Order(OrderArgs),
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Only products carrying this tag ("All" lists everything)
        #[arg(short, long)]
        tag: Option<String>,

        /// YAML catalog file (defaults to `CATALOG_PATH`, then the sample catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// List tag filters, starting with "All"
    Tags {
        /// YAML catalog file (defaults to `CATALOG_PATH`, then the sample catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { tag, catalog } => {
                commands::catalog::list(catalog.as_deref(), tag.as_deref())?;
            }
            CatalogAction::Tags { catalog } => commands::catalog::tags(catalog.as_deref())?,
        },
        Commands::Order(args) => commands::order::run(args).await?,
    }
    Ok(())
}
