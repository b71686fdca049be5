//! Owned cart state: the cart, its storage, and command dispatch.

use sheetstore_catalog::Catalog;
use sheetstore_core::VariantKey;

use crate::cart::Cart;
use crate::error::{CartError, OrderError};
use crate::order::{build_order_message, checkout_url, CheckoutConfig, CustomerDetails};
use crate::storage::CartStorage;

/// A user action against the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    Add {
        product_id: String,
        size: Option<String>,
    },
    ChangeQuantity {
        key: VariantKey,
        delta: i64,
    },
    SetQuantity {
        key: VariantKey,
        quantity: u32,
    },
    Remove {
        key: VariantKey,
    },
    UpdateSize {
        product_id: String,
        from: Option<String>,
        to: Option<String>,
    },
    Clear,
}

/// The cart plus the storage it is persisted to under `key`.
///
/// Every successful command writes a full snapshot. Storage failures are
/// logged and otherwise ignored so the in-memory cart stays usable.
#[derive(Debug)]
pub struct CartState<S: CartStorage> {
    cart: Cart,
    storage: S,
    key: String,
}

impl<S: CartStorage> CartState<S> {
    /// Loads the cart stored under `key`, starting empty when nothing is
    /// stored or the stored snapshot cannot be read.
    pub fn init(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = match storage.read(&key) {
            Ok(Some(snapshot)) => Cart::from_snapshot(&snapshot),
            Ok(None) => Cart::new(),
            Err(error) => {
                tracing::warn!(key = %key, %error, "could not read stored cart; starting empty");
                Cart::new()
            }
        };
        tracing::debug!(key = %key, lines = cart.len(), "cart loaded");
        Self { cart, storage, key }
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Applies `command` and persists the result.
    ///
    /// # Errors
    ///
    /// Returns the [`CartError`] of the underlying operation. Nothing is
    /// mutated or saved in that case.
    pub fn apply(&mut self, command: CartCommand, catalog: &Catalog) -> Result<(), CartError> {
        tracing::debug!(?command, "applying cart command");
        match command {
            CartCommand::Add { product_id, size } => {
                self.cart.add_line(&product_id, size.as_deref(), catalog)?;
            }
            CartCommand::ChangeQuantity { key, delta } => {
                self.cart.change_quantity(&key, delta)?;
            }
            CartCommand::SetQuantity { key, quantity } => {
                self.cart.set_quantity(&key, quantity)?;
            }
            CartCommand::Remove { key } => {
                if !self.cart.remove_line(&key) {
                    return Ok(());
                }
            }
            CartCommand::UpdateSize {
                product_id,
                from,
                to,
            } => {
                self.cart
                    .update_line_size(&product_id, from.as_deref(), to.as_deref())?;
            }
            CartCommand::Clear => self.cart.clear(),
        }
        self.save();
        Ok(())
    }

    /// Builds the checkout URL for the current cart and, on success, clears
    /// the cart. On failure the cart is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError`] when the cart is empty, a required customer
    /// field is blank or the recipient number is missing or invalid.
    pub fn checkout(
        &mut self,
        customer: &CustomerDetails,
        config: &CheckoutConfig,
    ) -> Result<String, OrderError> {
        let message = build_order_message(&self.cart, customer, &config.template)?;
        let url = checkout_url(&config.messaging_base, &config.recipient_number, &message)?;
        tracing::info!(
            lines = self.cart.len(),
            units = self.cart.count(),
            total = %self.cart.total(),
            "checkout message built; clearing cart"
        );
        self.cart.clear();
        self.save();
        Ok(url)
    }

    fn save(&mut self) {
        let result = self
            .cart
            .to_snapshot()
            .and_then(|snapshot| self.storage.write(&self.key, &snapshot));
        if let Err(error) = result {
            tracing::warn!(key = %self.key, %error, "failed to save cart snapshot");
        }
    }
}
