//! `cart` subcommands.

use std::path::Path;

use clap::Subcommand;
use sheetstore_cart::{Cart, CartCommand, CartState, FileStorage};
use sheetstore_catalog::Catalog;
use sheetstore_core::{format_money, AppConfig, VariantKey};

use crate::catalog::load_catalog;

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show cart lines, item count and total
    Show,
    /// Add one unit of a product
    Add {
        id: String,
        #[arg(long)]
        size: Option<String>,
    },
    /// Change a line's quantity by a signed amount; zero or less removes it
    Qty {
        id: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
        #[arg(long)]
        size: Option<String>,
    },
    /// Set a line's quantity (minimum 1)
    SetQty {
        id: String,
        quantity: u32,
        #[arg(long)]
        size: Option<String>,
    },
    /// Move a line to another size, merging with an existing line
    SetSize {
        id: String,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Remove a line
    Remove {
        id: String,
        #[arg(long)]
        size: Option<String>,
    },
    /// Empty the cart
    Clear,
}

impl CartCommands {
    /// The cart mutation this subcommand performs, or `None` for `show`.
    pub(crate) fn into_cart_command(self) -> Option<CartCommand> {
        let command = match self {
            CartCommands::Show => return None,
            CartCommands::Add { id, size } => CartCommand::Add {
                product_id: id,
                size,
            },
            CartCommands::Qty { id, delta, size } => CartCommand::ChangeQuantity {
                key: VariantKey::new(&id, size.as_deref()),
                delta,
            },
            CartCommands::SetQty { id, quantity, size } => CartCommand::SetQuantity {
                key: VariantKey::new(&id, size.as_deref()),
                quantity,
            },
            CartCommands::SetSize { id, from, to } => CartCommand::UpdateSize {
                product_id: id,
                from,
                to,
            },
            CartCommands::Remove { id, size } => CartCommand::Remove {
                key: VariantKey::new(&id, size.as_deref()),
            },
            CartCommands::Clear => CartCommand::Clear,
        };
        Some(command)
    }
}

/// Runs a `cart` subcommand against the persisted cart.
///
/// Only `add` needs the catalog, so the sheet is fetched for nothing else.
/// A reference to a missing product or line is reported and is not an error.
///
/// # Errors
///
/// Returns an error if the catalog client cannot be constructed.
pub(crate) async fn run_cart(
    command: CartCommands,
    config: &AppConfig,
    csv_file: Option<&Path>,
) -> anyhow::Result<()> {
    let mut state = CartState::init(FileStorage::new(&config.cart_dir), config.cart_key.clone());

    let Some(command) = command.into_cart_command() else {
        print_cart(state.cart(), &config.currency_symbol);
        return Ok(());
    };

    let catalog = if matches!(command, CartCommand::Add { .. }) {
        load_catalog(config, csv_file).await?.catalog().clone()
    } else {
        Catalog::default()
    };

    if let Err(e) = state.apply(command, &catalog) {
        eprintln!("nothing changed: {e}");
    }
    print_cart(state.cart(), &config.currency_symbol);
    Ok(())
}

pub(crate) fn print_cart(cart: &Cart, currency_symbol: &str) {
    if cart.is_empty() {
        println!("cart is empty");
        return;
    }

    println!("{:<16}{:<8}{:<32}{:>6}{:>16}", "ID", "SIZE", "NAME", "QTY", "SUBTOTAL");
    for line in cart.lines() {
        println!(
            "{:<16}{:<8}{:<32}{:>6}{:>16}",
            line.key.product_id,
            line.key.size().unwrap_or("-"),
            line.name,
            line.quantity,
            format_money(currency_symbol, line.subtotal())
        );
    }
    println!(
        "\n{} item(s), total {}",
        cart.count(),
        format_money(currency_symbol, cart.total())
    );
}
