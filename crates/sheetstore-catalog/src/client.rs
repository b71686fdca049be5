use std::time::Duration;

use reqwest::Client;

use crate::error::CatalogError;
use crate::rate_limit::retry_with_backoff;

/// Seconds to wait after a 429 that carries no usable `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// HTTP client for a published spreadsheet's CSV export.
///
/// Maps 429, 404 and other non-2xx responses to typed errors. Transient
/// failures (429, network errors) are retried with exponential backoff up to
/// `max_retries` additional attempts.
pub struct SheetClient {
    client: Client,
    max_retries: u32,
    /// Base delay in seconds: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl SheetClient {
    /// Creates a `SheetClient` with the given timeout, `User-Agent` and retry
    /// policy. `max_retries = 0` disables retries.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches the CSV document at `url` as text.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::RateLimited`]: HTTP 429 after all retries.
    /// - [`CatalogError::NotFound`]: HTTP 404 (not retried).
    /// - [`CatalogError::UnexpectedStatus`]: any other non-2xx (not retried).
    /// - [`CatalogError::Http`]: network or TLS failure after all retries.
    pub async fn fetch_csv(&self, url: &str) -> Result<String, CatalogError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                return Err(CatalogError::RateLimited {
                    domain: extract_domain(url),
                    retry_after_secs,
                });
            }

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(CatalogError::NotFound {
                    url: url.to_owned(),
                });
            }

            if !status.is_success() {
                return Err(CatalogError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            let body = response.text().await?;
            tracing::debug!(url, bytes = body.len(), "fetched sheet CSV");
            Ok(body)
        })
        .await
    }
}

/// Extracts the hostname from a URL for error messages, falling back to the
/// input when it has no recognizable scheme.
pub(crate) fn extract_domain(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    without_scheme
        .split(['/', '?'])
        .next()
        .unwrap_or(url)
        .to_owned()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
