//! Catalog loading and listing.

use std::path::Path;

use anyhow::Context;
use sheetstore_catalog::{
    Catalog, CatalogFilter, CatalogState, LoadStatus, NormalizeOptions, SheetClient,
};
use sheetstore_core::{format_money, AppConfig, Collection, ProductRecord};

/// Normalization options selected by `SHEETSTORE_REQUIRE_ID`.
pub(crate) fn normalize_options(config: &AppConfig) -> NormalizeOptions {
    if config.require_id {
        NormalizeOptions::code_column()
    } else {
        NormalizeOptions::default()
    }
}

/// Loads the catalog from `csv_file` when given, otherwise from the
/// published sheet. A failed load is reported and leaves an empty catalog.
///
/// # Errors
///
/// Returns an error if no `csv_file` is given and `SHEETSTORE_CSV_URL` is
/// unset, or if the HTTP client cannot be constructed.
pub(crate) async fn load_catalog(
    config: &AppConfig,
    csv_file: Option<&Path>,
) -> anyhow::Result<CatalogState> {
    let options = normalize_options(config);
    let mut state = CatalogState::new();

    match csv_file {
        Some(path) => {
            state.load_csv_file(path, &options);
        }
        None => {
            let url = config
                .require_csv_url()
                .context("pass --csv-file or set the published sheet URL")?;
            let client = SheetClient::new(
                config.fetch_timeout_secs,
                &config.user_agent,
                config.fetch_max_retries,
                config.retry_backoff_base_secs,
            )?;
            state.reload(&client, url, &options).await;
        }
    }

    if let LoadStatus::Failed { reason } = state.status() {
        eprintln!("could not load catalog: {reason}");
    }
    Ok(state)
}

/// Products to list for the given filter and `--featured` limit.
pub(crate) fn select_products<'a>(
    catalog: &'a Catalog,
    filter: &CatalogFilter,
    featured: Option<usize>,
) -> Vec<&'a ProductRecord> {
    match featured {
        Some(n) if *filter == CatalogFilter::default() => catalog.featured(n),
        Some(n) => catalog.filter(filter).into_iter().take(n).collect(),
        None => catalog.filter(filter),
    }
}

/// Prints the selected products grouped under their category headings.
pub(crate) fn run_catalog(
    catalog: &Catalog,
    filter: &CatalogFilter,
    featured: Option<usize>,
    currency_symbol: &str,
) {
    if catalog.is_empty() {
        println!("catalog is empty");
        return;
    }

    println!("categories: {}", catalog.category_names().join(", "));
    let sizes = catalog.size_options();
    if !sizes.is_empty() {
        println!("sizes: {}", sizes.join(", "));
    }

    let products = select_products(catalog, filter, featured);
    if products.is_empty() {
        println!("no products match the selected filters");
        return;
    }

    let mut current_category: Option<&str> = None;
    for product in products {
        if current_category != Some(product.category.as_str()) {
            println!("\n== {} ==", product.category);
            print_table_header();
            current_category = Some(product.category.as_str());
        }
        print_product_row(product, currency_symbol);
    }
}

/// Prints each curated collection with its matching products.
pub(crate) fn run_collections(
    catalog: &Catalog,
    collections: &[Collection],
    currency_symbol: &str,
) {
    if collections.is_empty() {
        println!("no collections configured");
        return;
    }

    for collection in collections {
        println!("\n== {} ==", collection.name);
        let products = catalog.collection(collection);
        if products.is_empty() {
            println!("no {} products found", collection.name.to_lowercase());
            continue;
        }
        print_table_header();
        for product in products {
            print_product_row(product, currency_symbol);
        }
    }
}

fn print_table_header() {
    println!("{:<16}{:<32}{:>14}  SIZES", "ID", "NAME", "PRICE");
}

fn print_product_row(product: &ProductRecord, currency_symbol: &str) {
    let mut flags = String::new();
    if product.priority {
        flags.push_str(" [featured]");
    }
    if !product.in_stock {
        flags.push_str(" [out of stock]");
    }
    println!(
        "{:<16}{:<32}{:>14}  {}{flags}",
        product.id,
        truncate(&product.name, 30),
        format_money(currency_symbol, product.price),
        if product.has_sizes() {
            product.sizes.join(",")
        } else {
            "-".to_string()
        },
    );
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars - 3).collect::<String>())
    } else {
        text.to_owned()
    }
}
