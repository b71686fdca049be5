//! `checkout` and `buy`: build an order message and print the messaging link.

use std::path::Path;

use anyhow::Context;
use sheetstore_cart::{
    build_direct_message, checkout_url, CartState, CheckoutConfig, CustomerDetails, FileStorage,
    MessageTemplate,
};
use sheetstore_core::{AppConfig, ProductRecord};

use crate::catalog::load_catalog;

/// Prints the checkout link for the persisted cart and clears the cart.
///
/// # Errors
///
/// Returns an error when no recipient number is configured, the cart is
/// empty or a required field is blank. The cart is kept in that case.
pub(crate) fn run_checkout(config: &AppConfig, customer: &CustomerDetails) -> anyhow::Result<()> {
    config.require_recipient_number()?;
    let mut state = CartState::init(FileStorage::new(&config.cart_dir), config.cart_key.clone());
    let url = state
        .checkout(customer, &CheckoutConfig::from_config(config))
        .context("checkout blocked")?;
    println!("{url}");
    Ok(())
}

/// Checks a `buy` size selection against the product's sizes.
///
/// # Errors
///
/// Returns an error if the product has sizes and `size` is missing or not
/// one of them.
pub(crate) fn check_size(product: &ProductRecord, size: Option<&str>) -> anyhow::Result<()> {
    if !product.has_sizes() {
        return Ok(());
    }
    let available = product.sizes.join(", ");
    match size.map(str::trim).filter(|s| !s.is_empty()) {
        None => anyhow::bail!("select a size for '{}': {available}", product.id),
        Some(s) if !product.offers_size(s) => {
            anyhow::bail!("size '{s}' is not offered for '{}': {available}", product.id)
        }
        Some(_) => Ok(()),
    }
}

/// Prints a single-product order message and its checkout link.
///
/// # Errors
///
/// Returns an error if no recipient number is configured, the product is
/// unknown or the size selection is invalid.
pub(crate) async fn run_buy(
    config: &AppConfig,
    csv_file: Option<&Path>,
    id: &str,
    size: Option<&str>,
    quantity: u32,
    notes: Option<&str>,
) -> anyhow::Result<()> {
    let recipient = config.require_recipient_number()?;
    let state = load_catalog(config, csv_file).await?;
    let product = state
        .catalog()
        .get(id.trim())
        .ok_or_else(|| anyhow::anyhow!("product '{id}' not found in catalog"))?;
    check_size(product, size)?;

    let message = build_direct_message(
        product,
        size,
        quantity,
        notes,
        &MessageTemplate::from_config(config),
    );
    let url = checkout_url(&config.messaging_base, recipient, &message)?;
    println!("{}\n\n{url}", message.text());
    Ok(())
}
