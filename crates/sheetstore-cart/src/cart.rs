//! The cart: an ordered list of lines, unique by [`VariantKey`].

use rust_decimal::Decimal;
use sheetstore_catalog::Catalog;
use sheetstore_core::VariantKey;

use crate::error::{CartError, StorageError};
use crate::line::{CartLine, StoredLine};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product_id` at `size`.
    ///
    /// An existing line for the same variant gains one unit; otherwise a new
    /// line is appended with the product's current name, price and image.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] when the catalog has no such
    /// product, or [`CartError::QuantityOverflow`] when the line is already
    /// at `u32::MAX`. The cart is unchanged.
    pub fn add_line(
        &mut self,
        product_id: &str,
        size: Option<&str>,
        catalog: &Catalog,
    ) -> Result<&CartLine, CartError> {
        let key = VariantKey::new(product_id, size);
        let product = catalog
            .get(&key.product_id)
            .ok_or_else(|| CartError::ProductNotFound {
                product_id: key.product_id.clone(),
            })?;

        let pos = match self.position(&key) {
            Some(pos) => {
                let line = &mut self.lines[pos];
                line.quantity = line
                    .quantity
                    .checked_add(1)
                    .ok_or(CartError::QuantityOverflow { key })?;
                pos
            }
            None => {
                self.lines.push(CartLine::from_product(product, key));
                self.lines.len() - 1
            }
        };
        Ok(&self.lines[pos])
    }

    /// Adjusts a line's quantity by `delta` and returns the new quantity.
    /// A result of zero or less removes the line and returns `0`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] when no line has `key`, or
    /// [`CartError::QuantityOverflow`] when the result exceeds `u32::MAX`.
    pub fn change_quantity(&mut self, key: &VariantKey, delta: i64) -> Result<u32, CartError> {
        let pos = self.require(key)?;
        let next = i64::from(self.lines[pos].quantity).saturating_add(delta);
        if next <= 0 {
            self.lines.remove(pos);
            return Ok(0);
        }
        let quantity =
            u32::try_from(next).map_err(|_| CartError::QuantityOverflow { key: key.clone() })?;
        self.lines[pos].quantity = quantity;
        Ok(quantity)
    }

    /// Sets a line's quantity outright. Values below 1 become 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] when no line has `key`.
    pub fn set_quantity(
        &mut self,
        key: &VariantKey,
        quantity: u32,
    ) -> Result<&CartLine, CartError> {
        let pos = self.require(key)?;
        self.lines[pos].quantity = quantity.max(1);
        Ok(&self.lines[pos])
    }

    /// Removes the line for `key`. Returns whether a line was removed.
    pub fn remove_line(&mut self, key: &VariantKey) -> bool {
        match self.position(key) {
            Some(pos) => {
                self.lines.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Moves a line from one size to another.
    ///
    /// If the target variant is already in the cart the two lines merge: the
    /// target keeps its position and gains the source's quantity. Otherwise
    /// the source line is relabelled in place. Either way the product's total
    /// quantity is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] when there is no line for
    /// `product_id` at `old_size`, or [`CartError::QuantityOverflow`] when
    /// the merged quantity would exceed `u32::MAX`. The cart is unchanged.
    pub fn update_line_size(
        &mut self,
        product_id: &str,
        old_size: Option<&str>,
        new_size: Option<&str>,
    ) -> Result<(), CartError> {
        let from = VariantKey::new(product_id, old_size);
        let to = VariantKey::new(product_id, new_size);
        let source = self.require(&from)?;
        if from == to {
            return Ok(());
        }

        match self.position(&to) {
            Some(target) => {
                let merged = self.lines[target]
                    .quantity
                    .checked_add(self.lines[source].quantity)
                    .ok_or(CartError::QuantityOverflow { key: to })?;
                self.lines[target].quantity = merged;
                self.lines.remove(source);
            }
            None => self.lines[source].key = to,
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of every line's unit price times quantity, saturating at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.subtotal()))
            .unwrap_or(Decimal::MAX)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn get(&self, key: &VariantKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.key == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Serializes the cart as a JSON array of stored lines.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialize`] if serialization fails.
    pub fn to_snapshot(&self) -> Result<String, StorageError> {
        let stored: Vec<StoredLine> = self.lines.iter().map(StoredLine::from).collect();
        Ok(serde_json::to_string(&stored)?)
    }

    /// Restores a cart from a snapshot. Never fails: an unreadable document
    /// yields an empty cart. Lines without an id or quantity are dropped and
    /// lines sharing a variant are merged. A duplicate whose merge would pass
    /// `u32::MAX` is dropped with a warning.
    #[must_use]
    pub fn from_snapshot(snapshot: &str) -> Self {
        let stored: Vec<StoredLine> = match serde_json::from_str(snapshot) {
            Ok(stored) => stored,
            Err(error) => {
                tracing::warn!(%error, "cart snapshot is unreadable; starting with an empty cart");
                return Self::new();
            }
        };

        let mut cart = Self::new();
        for line in stored.into_iter().filter_map(StoredLine::into_line) {
            match cart.position(&line.key) {
                Some(pos) => {
                    let existing = &mut cart.lines[pos];
                    match existing.quantity.checked_add(line.quantity) {
                        Some(merged) => existing.quantity = merged,
                        None => tracing::warn!(
                            key = %line.key,
                            dropped = line.quantity,
                            "duplicate cart line would overflow quantity; dropping it"
                        ),
                    }
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    fn position(&self, key: &VariantKey) -> Option<usize> {
        self.lines.iter().position(|l| &l.key == key)
    }

    fn require(&self, key: &VariantKey) -> Result<usize, CartError> {
        self.position(key)
            .ok_or_else(|| CartError::LineNotFound { key: key.clone() })
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
