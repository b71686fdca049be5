use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("sheet not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("CSV error in {context}: {source}")]
    Csv {
        context: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Returns `true` for failures fetching the source document, as opposed
    /// to failures reading it.
    #[must_use]
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            CatalogError::Http(_)
                | CatalogError::RateLimited { .. }
                | CatalogError::NotFound { .. }
                | CatalogError::UnexpectedStatus { .. }
        )
    }
}
