//! Header aliases accepted for each product field, and the raw row type the
//! normalizer reads through them.
//!
//! Store owners rename and re-case spreadsheet columns freely, so every
//! canonical field accepts an ordered list of header names. Matching is
//! case-insensitive on trimmed headers; the first alias carrying a non-empty
//! value wins.

/// Canonical product fields read from a sheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Description,
    Price,
    Sizes,
    Images,
    Category,
    Priority,
    PriorityRank,
    CategoryPriority,
    CategoryRank,
    Stock,
}

/// Ordered header aliases per field. Earlier aliases take precedence.
pub const FIELD_ALIASES: [(Field, &[&str]); 12] = [
    (Field::Id, &["id", "code", "product code", "product_code"]),
    (Field::Name, &["name", "title", "product"]),
    (Field::Description, &["description", "desc"]),
    (Field::Price, &["price", "amount"]),
    (Field::Sizes, &["sizes", "size"]),
    (
        Field::Images,
        &[
            "image_ids",
            "image_id",
            "imageid",
            "image",
            "images",
            "imageurls",
            "image id",
            "image-id",
        ],
    ),
    (Field::Category, &["category"]),
    (
        Field::Priority,
        &["priority", "featured", "is_priority", "is priority"],
    ),
    (
        Field::PriorityRank,
        &["priority_rank", "priorityrank", "priority rank"],
    ),
    (
        Field::CategoryPriority,
        &[
            "category_priority",
            "categorypriority",
            "category priority",
            "category-priority",
        ],
    ),
    (
        Field::CategoryRank,
        &["category_rank", "categoryrank", "category rank"],
    ),
    (Field::Stock, &["stock"]),
];

impl Field {
    /// Returns the accepted header names for this field, in precedence order.
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        FIELD_ALIASES
            .iter()
            .find(|(field, _)| *field == self)
            .map(|&(_, aliases)| aliases)
            .unwrap_or_default()
    }
}

/// One data row of the sheet as `(header, value)` cells in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.cells.push((header.into(), value.into()));
    }

    /// Returns the trimmed value of the first column whose trimmed header
    /// equals `header`, ignoring ASCII case.
    #[must_use]
    pub fn cell(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| h.trim().eq_ignore_ascii_case(header))
            .map(|(_, v)| v.trim())
    }

    /// Resolves `field` through its aliases. Returns `""` when no alias
    /// carries a value.
    #[must_use]
    pub fn lookup(&self, field: Field) -> &str {
        field
            .aliases()
            .iter()
            .filter_map(|alias| self.cell(alias))
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }

    /// Returns `true` when no canonical field resolves to a value.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        FIELD_ALIASES
            .iter()
            .all(|(field, _)| self.lookup(*field).is_empty())
    }
}
