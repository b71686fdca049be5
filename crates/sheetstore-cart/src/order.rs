//! Order messages for the messaging-app checkout handoff.
//!
//! Building a message has no side effects. Opening the link and clearing the
//! cart afterwards belong to the caller (see [`crate::CartState::checkout`]).

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rust_decimal::Decimal;
use sheetstore_catalog::primary_image_url;
use sheetstore_core::{format_money, AppConfig, ProductRecord};

use crate::cart::Cart;
use crate::error::OrderError;

/// Characters a URI component may carry unescaped: alphanumerics plus
/// `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Shown in place of a size for lines without one.
const NO_SIZE: &str = "N/A";

/// Customer-entered checkout fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: Option<String>,
    pub pincode: Option<String>,
    pub notes: Option<String>,
}

impl CustomerDetails {
    fn validate(&self) -> Result<(), OrderError> {
        for (field, value) in [
            ("name", &self.name),
            ("phone", &self.phone),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                return Err(OrderError::MissingField { field });
            }
        }
        Ok(())
    }
}

/// Shop-specific parts of every message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    pub shop_name: String,
    pub currency_symbol: String,
}

impl MessageTemplate {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            shop_name: config.shop_name.clone(),
            currency_symbol: config.currency_symbol.clone(),
        }
    }

    fn money(&self, amount: Decimal) -> String {
        format_money(&self.currency_symbol, amount)
    }
}

/// Where checkout messages are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub messaging_base: String,
    /// Empty when no recipient is configured.
    pub recipient_number: String,
    pub template: MessageTemplate,
}

impl CheckoutConfig {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            messaging_base: config.messaging_base.clone(),
            recipient_number: config.recipient_number.clone().unwrap_or_default(),
            template: MessageTemplate::from_config(config),
        }
    }
}

/// A plain-text order message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderMessage {
    text: String,
}

impl OrderMessage {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The message percent-encoded for use as a URL query value.
    #[must_use]
    pub fn encoded(&self) -> String {
        utf8_percent_encode(&self.text, URI_COMPONENT).to_string()
    }
}

impl std::fmt::Display for OrderMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Builds the checkout message for `cart`.
///
/// # Errors
///
/// - [`OrderError::EmptyCart`] if the cart has no lines (checked first).
/// - [`OrderError::MissingField`] if name, phone or address is blank.
pub fn build_order_message(
    cart: &Cart,
    customer: &CustomerDetails,
    template: &MessageTemplate,
) -> Result<OrderMessage, OrderError> {
    if cart.is_empty() {
        return Err(OrderError::EmptyCart);
    }
    customer.validate()?;

    let mut lines = vec![
        format!("New order - {}", template.shop_name),
        String::new(),
        "Items:".to_owned(),
    ];
    lines.extend(cart.lines().iter().map(|line| {
        format!(
            "{} ({}) x{} - {}",
            line.name,
            line.key.size().unwrap_or(NO_SIZE),
            line.quantity,
            template.money(line.subtotal())
        )
    }));
    lines.push(String::new());
    lines.push(format!("Total: {}", template.money(cart.total())));
    lines.push(String::new());

    let mut address = customer.address.trim().to_owned();
    if let Some(city) = non_blank(customer.city.as_deref()) {
        address.push_str(&format!(", {city}"));
    }
    if let Some(pincode) = non_blank(customer.pincode.as_deref()) {
        address.push_str(&format!(" - {pincode}"));
    }
    lines.push(format!("Customer: {}", customer.name.trim()));
    lines.push(format!("Phone: {}", customer.phone.trim()));
    lines.push(format!("Address: {address}"));
    if let Some(notes) = non_blank(customer.notes.as_deref()) {
        lines.push(format!("Notes: {notes}"));
    }

    Ok(OrderMessage {
        text: lines.join("\n"),
    })
}

/// Builds a single-product "buy now" message.
#[must_use]
pub fn build_direct_message(
    product: &ProductRecord,
    size: Option<&str>,
    quantity: u32,
    notes: Option<&str>,
    template: &MessageTemplate,
) -> OrderMessage {
    let display_name = if product.name.is_empty() {
        &product.id
    } else {
        &product.name
    };

    let mut lines = vec![
        format!("Hello {},", template.shop_name),
        String::new(),
        "I would like to order:".to_owned(),
        String::new(),
        format!("Product: {display_name}"),
        format!("Product Code: {}", product.id),
        format!("Size: {}", non_blank(size).unwrap_or(NO_SIZE)),
        format!("Quantity: {}", quantity.max(1)),
    ];
    if !product.price.is_zero() {
        lines.push(format!("Price: {}", template.money(product.price)));
    }
    if let Some(notes) = non_blank(notes) {
        lines.push(format!("Notes: {notes}"));
    }
    if let Some(url) = primary_image_url(product) {
        lines.push(String::new());
        lines.push(format!("Image: {url}"));
    }

    OrderMessage {
        text: lines.join("\n"),
    }
}

/// Builds `<base>/<recipient>?text=<encoded message>`.
///
/// # Errors
///
/// Returns [`OrderError::MissingRecipient`] when `recipient` is empty and
/// [`OrderError::InvalidRecipient`] when it holds anything but ASCII digits.
pub fn checkout_url(
    base: &str,
    recipient: &str,
    message: &OrderMessage,
) -> Result<String, OrderError> {
    if recipient.is_empty() {
        return Err(OrderError::MissingRecipient);
    }
    if !recipient.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OrderError::InvalidRecipient);
    }
    Ok(format!(
        "{}/{recipient}?text={}",
        base.trim_end_matches('/'),
        message.encoded()
    ))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "order_test.rs"]
mod tests;
