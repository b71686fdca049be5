//! Cart lines and their persisted shape.
//!
//! The persisted shape is deliberately loose: every field has a default,
//! unknown fields are ignored, and older snapshots that used `qty`, `image`
//! or `image_id` still load. Prices and quantities are accepted as numbers
//! or strings.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sheetstore_core::{bounded_price, parse_price, ProductRecord, VariantKey};

/// One purchasable variant in the cart.
///
/// Name, unit price and image are copied from the catalog when the line is
/// created; later catalog changes do not touch existing lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub key: VariantKey,
    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
    pub unit_price: Decimal,
    pub name: String,
    /// Primary image token at add time, unresolved.
    pub image_id: String,
}

impl CartLine {
    /// A quantity-1 line snapshotting `product`'s display fields.
    #[must_use]
    pub fn from_product(product: &ProductRecord, key: VariantKey) -> Self {
        Self {
            key,
            quantity: 1,
            unit_price: product.price,
            name: product.name.clone(),
            image_id: product.primary_image_id().unwrap_or_default().to_owned(),
        }
    }

    /// Unit price times quantity, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }
}

/// Serialized form of a [`CartLine`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredLine {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "lenient_price")]
    pub price: Decimal,
    #[serde(alias = "image", alias = "image_id")]
    pub image_id: String,
    #[serde(alias = "qty", deserialize_with = "lenient_quantity")]
    pub quantity: u32,
    #[serde(deserialize_with = "lenient_size")]
    pub size: String,
}

impl From<&CartLine> for StoredLine {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.key.product_id.clone(),
            name: line.name.clone(),
            price: line.unit_price,
            image_id: line.image_id.clone(),
            quantity: line.quantity,
            size: line.key.size.clone(),
        }
    }
}

impl StoredLine {
    /// Converts back into a cart line, or `None` when the stored line has
    /// no id or no quantity.
    #[must_use]
    pub fn into_line(self) -> Option<CartLine> {
        let key = VariantKey::new(&self.id, Some(&self.size));
        if key.product_id.is_empty() || self.quantity == 0 {
            return None;
        }
        Some(CartLine {
            key,
            quantity: self.quantity,
            unit_price: self.price,
            name: self.name,
            image_id: self.image_id,
        })
    }
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match Value::deserialize(deserializer)? {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .unwrap_or(Decimal::ZERO),
        Value::String(s) => parse_price(&s),
        _ => Decimal::ZERO,
    };
    Ok(bounded_price(price))
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let quantity = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 1.0).map(f64_to_count)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(quantity.map_or(0, |q| u32::try_from(q).unwrap_or(u32::MAX)))
}

fn lenient_size<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn f64_to_count(value: f64) -> u64 {
    value.floor() as u64
}
