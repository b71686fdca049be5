use crate::app_config::{AppConfig, Environment};
use crate::collection::{Collection, DEFAULT_COLLECTIONS};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var has an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var has an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` lookup instead of mutating process env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let csv_url = optional("SHEETSTORE_CSV_URL");
    let recipient_number = optional("SHEETSTORE_RECIPIENT_NUMBER")
        .map(|raw| parse_recipient(&raw))
        .transpose()?;

    let env = parse_environment(&or_default("SHEETSTORE_ENV", "development"))?;
    let log_level = or_default("SHEETSTORE_LOG_LEVEL", "info");
    let messaging_base = or_default("SHEETSTORE_MESSAGING_BASE", "https://wa.me");
    let shop_name = or_default("SHEETSTORE_SHOP_NAME", "Sheet Store");
    let currency_symbol = or_default("SHEETSTORE_CURRENCY_SYMBOL", "₹");
    let cart_dir = PathBuf::from(or_default("SHEETSTORE_CART_DIR", "./.sheetstore"));
    let cart_key = or_default("SHEETSTORE_CART_KEY", "cd_store_cart");
    let require_id = parse_bool(
        "SHEETSTORE_REQUIRE_ID",
        &or_default("SHEETSTORE_REQUIRE_ID", "false"),
    )?;

    let collections =
        parse_collections(&or_default("SHEETSTORE_COLLECTIONS", DEFAULT_COLLECTIONS))?;

    let fetch_timeout_secs = parse_u64("SHEETSTORE_FETCH_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SHEETSTORE_USER_AGENT", "sheetstore/0.1");
    let fetch_max_retries = parse_u32("SHEETSTORE_FETCH_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("SHEETSTORE_RETRY_BACKOFF_BASE_SECS", "2")?;

    Ok(AppConfig {
        env,
        log_level,
        csv_url,
        recipient_number,
        messaging_base,
        shop_name,
        currency_symbol,
        cart_dir,
        cart_key,
        require_id,
        collections,
        fetch_timeout_secs,
        user_agent,
        fetch_max_retries,
        retry_backoff_base_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHEETSTORE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

/// Parses `Name=KEY,KEY;Name=KEY`. A blank value disables collections.
fn parse_collections(raw: &str) -> Result<Vec<Collection>, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "SHEETSTORE_COLLECTIONS".to_string(),
        reason,
    };

    raw.split(';')
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            let (name, keywords) = entry
                .split_once('=')
                .ok_or_else(|| invalid(format!("expected Name=KEYWORDS, got '{}'", entry.trim())))?;
            let collection = Collection::new(name, keywords.split(','));
            if collection.name.is_empty() || collection.keywords.is_empty() {
                return Err(invalid(format!(
                    "collection '{}' needs a name and at least one keyword",
                    entry.trim()
                )));
            }
            Ok(collection)
        })
        .collect()
}

/// The recipient is embedded in the deep-link path, so only digits are allowed.
fn parse_recipient(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidEnvVar {
            var: "SHEETSTORE_RECIPIENT_NUMBER".to_string(),
            reason: "recipient number must contain digits only (no '+', spaces or dashes)"
                .to_string(),
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
