use sheetstore_core::VariantKey;
use thiserror::Error;

/// Cart operations that reference something absent or would push a
/// quantity past `u32::MAX`. The cart is never mutated when one of these is
/// returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("product not found in catalog: {product_id}")]
    ProductNotFound { product_id: String },

    #[error("no cart line for {key}")]
    LineNotFound { key: VariantKey },

    #[error("quantity for {key} would exceed {max}", max = u32::MAX)]
    QuantityOverflow { key: VariantKey },
}

/// Checkout preconditions. These block the handoff and leave the cart as is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("no recipient number configured")]
    MissingRecipient,

    #[error("recipient number must be digits only")]
    InvalidRecipient,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize cart snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}
