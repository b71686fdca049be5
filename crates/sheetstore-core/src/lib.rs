pub mod app_config;
pub mod collection;
pub mod config;
pub mod money;
pub mod products;
pub mod variant;

pub use app_config::{AppConfig, Environment};
pub use collection::{Collection, DEFAULT_COLLECTIONS};
pub use config::{load_app_config, load_app_config_from_env};
pub use money::{bounded_price, format_money, parse_price, MAX_PRICE};
pub use products::{CategoryGroup, ProductRecord, UNCATEGORIZED};
pub use variant::{normalize_size, VariantKey};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
