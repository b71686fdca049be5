//! Curated storefront shelves: a name plus category keywords.

/// Shelves shown when `SHEETSTORE_COLLECTIONS` is unset.
pub const DEFAULT_COLLECTIONS: &str =
    "Trending=CO,CO-ORD,COORD;Ethnic=ETHNIC,KURTI,SAREE,LEHENGA";

/// A named shelf holding every product whose category contains one of
/// `keywords` (case-insensitive substring match).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub name: String,
    /// Uppercased, trimmed and non-empty.
    pub keywords: Vec<String>,
}

impl Collection {
    #[must_use]
    pub fn new<I, S>(name: &str, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.trim().to_owned(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_uppercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        let category = category.to_uppercase();
        self.keywords.iter().any(|k| category.contains(k.as_str()))
    }
}
