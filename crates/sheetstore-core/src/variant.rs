use serde::{Deserialize, Serialize};

/// Identity of a purchasable item: a product at one size selection.
///
/// An absent size and an empty size are the same key, and both parts are
/// trimmed, so `("A1", None)`, `("A1", Some(""))` and `(" A1 ", Some("  "))`
/// all compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariantKey {
    pub product_id: String,
    pub size: String,
}

impl VariantKey {
    #[must_use]
    pub fn new(product_id: &str, size: Option<&str>) -> Self {
        Self {
            product_id: product_id.trim().to_owned(),
            size: normalize_size(size),
        }
    }

    /// Returns the size, or `None` for the no-size variant.
    #[must_use]
    pub fn size(&self) -> Option<&str> {
        if self.size.is_empty() {
            None
        } else {
            Some(&self.size)
        }
    }
}

/// Normalizes an optional size selection: absent becomes `""`, values are trimmed.
#[must_use]
pub fn normalize_size(size: Option<&str>) -> String {
    size.map(str::trim).unwrap_or_default().to_owned()
}

impl std::fmt::Display for VariantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.size() {
            Some(size) => write!(f, "{} ({size})", self.product_id),
            None => write!(f, "{}", self.product_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_size_are_equal() {
        assert_eq!(VariantKey::new("A1", None), VariantKey::new("A1", Some("")));
        assert_eq!(
            VariantKey::new(" A1 ", Some("  ")),
            VariantKey::new("A1", None)
        );
    }

    #[test]
    fn different_sizes_are_different_keys() {
        assert_ne!(
            VariantKey::new("A1", Some("S")),
            VariantKey::new("A1", Some("M"))
        );
    }

    #[test]
    fn size_accessor_hides_empty() {
        assert_eq!(VariantKey::new("A1", Some(" M ")).size(), Some("M"));
        assert!(VariantKey::new("A1", None).size().is_none());
    }

    #[test]
    fn display_includes_size_when_present() {
        assert_eq!(VariantKey::new("A1", Some("S")).to_string(), "A1 (S)");
        assert_eq!(VariantKey::new("A1", None).to_string(), "A1");
    }
}
