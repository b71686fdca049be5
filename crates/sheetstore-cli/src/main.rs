mod cart;
mod catalog;
mod checkout;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sheetstore_cart::CustomerDetails;
use sheetstore_catalog::CatalogFilter;
use tracing_subscriber::EnvFilter;

use crate::cart::CartCommands;

#[derive(Debug, Parser)]
#[command(name = "sheetstore-cli")]
#[command(about = "Spreadsheet storefront: browse the catalog, manage the cart, check out")]
struct Cli {
    /// Read products from a local CSV file instead of the published sheet
    #[arg(long, global = true)]
    csv_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products in display order
    Catalog {
        /// Only products in this category (exact name)
        #[arg(long)]
        category: Option<String>,
        /// Only products offering this size
        #[arg(long)]
        size: Option<String>,
        /// Show only the first N products
        #[arg(long)]
        featured: Option<usize>,
    },
    /// List the curated collections from SHEETSTORE_COLLECTIONS
    Collections,
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Build the order message for the cart and print the checkout link
    Checkout {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        pincode: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Print a checkout link for a single product, bypassing the cart
    Buy {
        /// Product id or code
        id: String,
        #[arg(long)]
        size: Option<String>,
        #[arg(long, default_value_t = 1)]
        qty: u32,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = sheetstore_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let Some(command) = cli.command else {
        println!("sheetstore-cli ready; run with --help to list commands");
        return Ok(());
    };
    let csv_file = cli.csv_file.as_deref();

    match command {
        Commands::Catalog {
            category,
            size,
            featured,
        } => {
            let state = catalog::load_catalog(&config, csv_file).await?;
            let filter = CatalogFilter { category, size };
            catalog::run_catalog(state.catalog(), &filter, featured, &config.currency_symbol);
        }
        Commands::Collections => {
            let state = catalog::load_catalog(&config, csv_file).await?;
            catalog::run_collections(
                state.catalog(),
                &config.collections,
                &config.currency_symbol,
            );
        }
        Commands::Cart { command } => cart::run_cart(command, &config, csv_file).await?,
        Commands::Checkout {
            name,
            phone,
            address,
            city,
            pincode,
            notes,
        } => {
            let customer = CustomerDetails {
                name,
                phone,
                address,
                city,
                pincode,
                notes,
            };
            checkout::run_checkout(&config, &customer)?;
        }
        Commands::Buy {
            id,
            size,
            qty,
            notes,
        } => {
            checkout::run_buy(
                &config,
                csv_file,
                &id,
                size.as_deref(),
                qty,
                notes.as_deref(),
            )
            .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
