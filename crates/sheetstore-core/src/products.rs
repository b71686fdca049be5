use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category assigned to products whose sheet row leaves the category blank.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A product row from the store spreadsheet, normalized into canonical
/// fields regardless of how the sheet's headers were named or cased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Stable key. Taken from the `id`/`code` column, or derived
    /// deterministically from name and category when the sheet has none.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Non-negative unit price parsed from the free-text price cell.
    pub price: Decimal,
    pub category: String,
    /// Selectable sizes in sheet order. Empty means "one size".
    pub sizes: Vec<String>,
    /// Raw image tokens (drive file ids or URLs). The first is the primary image.
    pub image_ids: Vec<String>,
    /// Product-level featuring flag.
    pub priority: bool,
    /// Higher ranks sort earlier among products with the same `priority`.
    pub priority_rank: f64,
    /// Category-level featuring signal; lower values sort earlier.
    pub category_priority: Option<f64>,
    /// Tie-breaker for categories sharing a `category_priority`; higher first.
    pub category_rank: f64,
    /// `false` when the sheet's stock column says the product is out of stock.
    pub in_stock: bool,
}

impl ProductRecord {
    /// Returns the primary image token, if the product has any images.
    #[must_use]
    pub fn primary_image_id(&self) -> Option<&str> {
        self.image_ids.first().map(String::as_str)
    }

    /// Returns `true` if the product offers a size dimension.
    #[must_use]
    pub fn has_sizes(&self) -> bool {
        !self.sizes.is_empty()
    }

    /// Returns `true` if `size` is one of this product's sizes.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }
}

/// Products sharing a category, with the aggregated ranking signals used to
/// place the category in the storefront's display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub name: String,
    /// Products in display order.
    pub products: Vec<ProductRecord>,
    /// Lowest category priority declared by any member product.
    pub category_priority: Option<f64>,
    /// Highest category rank declared by any member product, floor `0`.
    pub category_rank: f64,
    pub contains_priority_product: bool,
}

impl CategoryGroup {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            products: Vec::new(),
            category_priority: None,
            category_rank: 0.0,
            contains_priority_product: false,
        }
    }

    /// Adds `product` and folds its category signals into the group.
    pub fn push(&mut self, product: ProductRecord) {
        if let Some(candidate) = product.category_priority {
            self.category_priority = Some(match self.category_priority {
                Some(current) if current <= candidate => current,
                _ => candidate,
            });
        }
        if product.category_rank > self.category_rank {
            self.category_rank = product.category_rank;
        }
        if product.priority {
            self.contains_priority_product = true;
        }
        self.products.push(product);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
