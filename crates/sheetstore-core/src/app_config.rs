use std::path::PathBuf;

use crate::{Collection, ConfigError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Published spreadsheet CSV URL. Only needed when the catalog is not
    /// read from a local file.
    pub csv_url: Option<String>,
    /// Messaging recipient, digits only (country code included, no `+`).
    /// Only needed for checkout.
    pub recipient_number: Option<String>,
    /// Deep-link base the recipient and message are appended to.
    pub messaging_base: String,
    pub shop_name: String,
    pub currency_symbol: String,
    /// Directory holding the persisted cart snapshot.
    pub cart_dir: PathBuf,
    /// Storage key of the cart snapshot.
    pub cart_key: String,
    /// When `true`, rows without an id/code are skipped instead of receiving
    /// a derived id, and categories are uppercased.
    pub require_id: bool,
    /// Curated shelves listed by the `collections` command.
    pub collections: Vec<Collection>,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    pub fetch_max_retries: u32,
    pub retry_backoff_base_secs: u64,
}

impl AppConfig {
    /// The published sheet URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when `SHEETSTORE_CSV_URL` is unset.
    pub fn require_csv_url(&self) -> Result<&str, ConfigError> {
        self.csv_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("SHEETSTORE_CSV_URL".to_string()))
    }

    /// The checkout recipient number.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when `SHEETSTORE_RECIPIENT_NUMBER`
    /// is unset.
    pub fn require_recipient_number(&self) -> Result<&str, ConfigError> {
        self.recipient_number
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("SHEETSTORE_RECIPIENT_NUMBER".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("csv_url", &self.csv_url)
            .field(
                "recipient_number",
                &self.recipient_number.as_ref().map(|_| "[redacted]"),
            )
            .field("messaging_base", &self.messaging_base)
            .field("shop_name", &self.shop_name)
            .field("currency_symbol", &self.currency_symbol)
            .field("cart_dir", &self.cart_dir)
            .field("cart_key", &self.cart_key)
            .field("require_id", &self.require_id)
            .field("collections", &self.collections)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("fetch_max_retries", &self.fetch_max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .finish()
    }
}
