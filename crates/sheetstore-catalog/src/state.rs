//! Owned catalog state: the current catalog plus the outcome of the last load.

use std::path::Path;

use crate::builder::Catalog;
use crate::client::SheetClient;
use crate::error::CatalogError;
use crate::normalize::{normalize_rows, NormalizeOptions};
use crate::sheet::read_rows;

/// Outcome of the most recent catalog load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    Loaded {
        products: usize,
        categories: usize,
    },
    Failed {
        reason: String,
    },
}

impl LoadStatus {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadStatus::Failed { .. })
    }
}

/// Parses CSV text and builds a catalog from it.
///
/// # Errors
///
/// Returns [`CatalogError::Csv`] if the header row cannot be read.
pub fn build_catalog(text: &str, options: &NormalizeOptions) -> Result<Catalog, CatalogError> {
    let rows = read_rows(text)?;
    let products = normalize_rows(&rows, options);
    Ok(Catalog::build(products))
}

/// The storefront's catalog. Each successful load replaces the whole catalog;
/// a failed load keeps the previous one and records the failure.
#[derive(Debug, Default)]
pub struct CatalogState {
    catalog: Catalog,
    status: LoadStatus,
}

impl CatalogState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Fetches the sheet at `url` and rebuilds the catalog.
    ///
    /// Fetch and parse failures are not propagated: they are logged and
    /// recorded as [`LoadStatus::Failed`] while the previous catalog stays
    /// in place.
    pub async fn reload(
        &mut self,
        client: &SheetClient,
        url: &str,
        options: &NormalizeOptions,
    ) -> &LoadStatus {
        let result = match client.fetch_csv(url).await {
            Ok(text) => build_catalog(&text, options),
            Err(e) => Err(e),
        };
        self.apply(result, url)
    }

    /// Builds the catalog from CSV text already in memory.
    pub fn load_csv_text(&mut self, text: &str, options: &NormalizeOptions) -> &LoadStatus {
        let result = build_catalog(text, options);
        self.apply(result, "inline CSV")
    }

    /// Builds the catalog from a CSV file on disk.
    pub fn load_csv_file(&mut self, path: &Path, options: &NormalizeOptions) -> &LoadStatus {
        let source = path.display().to_string();
        let result = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io {
                path: source.clone(),
                source: e,
            })
            .and_then(|text| build_catalog(&text, options));
        self.apply(result, &source)
    }

    fn apply(&mut self, result: Result<Catalog, CatalogError>, source: &str) -> &LoadStatus {
        match result {
            Ok(catalog) => {
                tracing::info!(
                    source,
                    products = catalog.len(),
                    categories = catalog.groups().len(),
                    "catalog loaded"
                );
                self.status = LoadStatus::Loaded {
                    products: catalog.len(),
                    categories: catalog.groups().len(),
                };
                self.catalog = catalog;
            }
            Err(e) => {
                tracing::warn!(source, error = %e, "catalog load failed; keeping previous catalog");
                self.status = LoadStatus::Failed {
                    reason: e.to_string(),
                };
            }
        }
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "id,name,price,size,category\n\
                         A1,Dress,₹499,\"S,M\",Ethnic\n\
                         A2,Top,not-a-number,,\n";

    #[test]
    fn starts_not_loaded_and_empty() {
        let state = CatalogState::new();
        assert_eq!(state.status(), &LoadStatus::NotLoaded);
        assert!(state.catalog().is_empty());
    }

    #[test]
    fn load_csv_text_builds_catalog() {
        let mut state = CatalogState::new();
        let status = state.load_csv_text(SHEET, &NormalizeOptions::default());
        assert_eq!(
            status,
            &LoadStatus::Loaded {
                products: 2,
                categories: 2
            }
        );
        assert_eq!(
            state.catalog().category_names(),
            vec!["Ethnic", "Uncategorized"]
        );
        assert!(state.catalog().get("A2").unwrap().price.is_zero());
    }

    #[test]
    fn missing_file_keeps_previous_catalog() {
        let mut state = CatalogState::new();
        state.load_csv_text(SHEET, &NormalizeOptions::default());

        let status = state.load_csv_file(
            Path::new("/nonexistent/sheetstore/products.csv"),
            &NormalizeOptions::default(),
        );
        assert!(status.is_failed());
        assert_eq!(state.catalog().len(), 2);
    }

    #[test]
    fn reload_replaces_whole_catalog() {
        let mut state = CatalogState::new();
        state.load_csv_text(SHEET, &NormalizeOptions::default());
        state.load_csv_text("id,name\nB1,Scarf\n", &NormalizeOptions::default());
        assert_eq!(state.catalog().len(), 1);
        assert!(state.catalog().get("A1").is_none());
    }

    #[test]
    fn code_column_options_skip_rows_without_code() {
        let mut state = CatalogState::new();
        state.load_csv_text(
            "code,name,category\nC1,Kurti,ethnic\n,Orphan,ethnic\n",
            &NormalizeOptions::code_column(),
        );
        assert_eq!(state.catalog().len(), 1);
        assert_eq!(state.catalog().category_names(), vec!["ETHNIC"]);
    }
}
