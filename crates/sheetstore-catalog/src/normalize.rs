//! Normalization from raw sheet rows to [`sheetstore_core::ProductRecord`].
//!
//! Header resolution goes through [`crate::fields::FIELD_ALIASES`]; this
//! module turns the resolved strings into typed fields. Malformed cells never
//! fail a row: numbers, flags and lists fall back to neutral defaults.

use sha2::{Digest, Sha256};
use sheetstore_core::{parse_price, ProductRecord, UNCATEGORIZED};

use crate::fields::{Field, RawRow};

/// Per-sheet normalization switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Skip rows with no id/code instead of deriving one.
    pub require_id: bool,
    /// Uppercase category names (sheets that use category codes).
    pub uppercase_category: bool,
}

impl NormalizeOptions {
    /// Options for sheets keyed by a mandatory product code column.
    #[must_use]
    pub fn code_column() -> Self {
        Self {
            require_id: true,
            uppercase_category: true,
        }
    }
}

/// Normalizes one sheet row into a [`ProductRecord`].
///
/// Returns `None` when the row must be skipped: every canonical field is
/// empty, or `options.require_id` is set and the row has no id.
#[must_use]
pub fn normalize_row(row: &RawRow, options: &NormalizeOptions) -> Option<ProductRecord> {
    if row.is_blank() {
        return None;
    }

    let raw_id = row.lookup(Field::Id);
    if options.require_id && raw_id.is_empty() {
        return None;
    }

    let name = row.lookup(Field::Name).to_owned();
    let category = normalize_category(row.lookup(Field::Category), options);
    let id = if raw_id.is_empty() {
        fallback_id(&name, &category)
    } else {
        raw_id.to_owned()
    };

    Some(ProductRecord {
        id,
        name,
        description: row.lookup(Field::Description).to_owned(),
        price: parse_price(row.lookup(Field::Price)),
        category,
        sizes: split_list(row.lookup(Field::Sizes)),
        image_ids: split_list(row.lookup(Field::Images)),
        priority: parse_flag(row.lookup(Field::Priority)),
        priority_rank: parse_rank(row.lookup(Field::PriorityRank)),
        category_priority: parse_category_priority(row.lookup(Field::CategoryPriority)),
        category_rank: parse_rank(row.lookup(Field::CategoryRank)),
        in_stock: parse_in_stock(row.lookup(Field::Stock)),
    })
}

/// Normalizes every row, dropping the ones [`normalize_row`] skips.
#[must_use]
pub fn normalize_rows(rows: &[RawRow], options: &NormalizeOptions) -> Vec<ProductRecord> {
    let products: Vec<ProductRecord> = rows
        .iter()
        .filter_map(|row| normalize_row(row, options))
        .collect();

    tracing::debug!(
        rows = rows.len(),
        products = products.len(),
        skipped = rows.len() - products.len(),
        "normalized sheet rows"
    );

    products
}

fn normalize_category(raw: &str, options: &NormalizeOptions) -> String {
    if raw.is_empty() {
        return UNCATEGORIZED.to_owned();
    }
    if options.uppercase_category {
        raw.to_uppercase()
    } else {
        raw.to_owned()
    }
}

/// Derives a stable id for rows without one, so the same product keeps its
/// identity (and its cart lines) across catalog reloads.
pub(crate) fn fallback_id(name: &str, category: &str) -> String {
    let digest = Sha256::digest(format!("{name}\u{1f}{category}").as_bytes());
    let hex = format!("{digest:x}");
    format!("p-{}", &hex[..12])
}

/// Splits a comma-separated cell, trimming pieces and dropping empty ones.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// `true`, `1`, `yes` and `y` (any case) are truthy; everything else is not.
pub(crate) fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

/// Parses a rank cell. Empty, unparsable and non-finite values rank `0`.
pub(crate) fn parse_rank(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        // Adding zero folds -0.0 into 0.0 so both rank identically.
        .map_or(0.0, |v| v + 0.0)
}

/// Parses a category priority cell. Empty, unparsable, non-finite and zero
/// values mean "no category priority".
pub(crate) fn parse_category_priority(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v != 0.0)
}

fn parse_in_stock(raw: &str) -> bool {
    !raw.to_lowercase().contains("out")
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
