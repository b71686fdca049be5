//! Catalog assembly: id index, category grouping and display ordering.
//!
//! Category display order:
//! 1. categories with a category priority, ascending by priority, then
//!    descending by category rank, then by name;
//! 2. remaining categories containing a priority product, by name;
//! 3. everything else, by name.
//!
//! Within a category, priority products come first, then higher priority
//! rank, then name. All sorts are stable so equal keys keep sheet order.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use sheetstore_core::{CategoryGroup, Collection, ProductRecord, UNCATEGORIZED};

/// One load cycle's products plus their category grouping in display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<ProductRecord>,
    index: HashMap<String, usize>,
    groups: Vec<CategoryGroup>,
}

/// Storefront filter bar selection. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub size: Option<String>,
}

impl Catalog {
    /// Builds a catalog from normalized records in sheet order.
    ///
    /// When two records share an id the later one replaces the earlier one
    /// in place, keeping the earlier row's position.
    #[must_use]
    pub fn build(records: Vec<ProductRecord>) -> Self {
        let mut products: Vec<ProductRecord> = Vec::with_capacity(records.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(records.len());

        for record in records {
            if let Some(&pos) = index.get(&record.id) {
                tracing::warn!(
                    product_id = %record.id,
                    "duplicate product id in sheet; the later row replaces the earlier one"
                );
                products[pos] = record;
            } else {
                index.insert(record.id.clone(), products.len());
                products.push(record);
            }
        }

        let groups = group_by_category(&products);
        Self {
            products,
            index,
            groups,
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ProductRecord> {
        self.index.get(id).map(|&pos| &self.products[pos])
    }

    /// Products in sheet order, de-duplicated by id.
    #[must_use]
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    /// Category groups in display order.
    #[must_use]
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Category names in display order.
    #[must_use]
    pub fn category_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    /// Every size offered by any product, sorted and de-duplicated.
    #[must_use]
    pub fn size_options(&self) -> Vec<&str> {
        self.products
            .iter()
            .flat_map(|p| p.sizes.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// All products in display order: group by group, each group sorted.
    pub fn display_order(&self) -> impl Iterator<Item = &ProductRecord> {
        self.groups.iter().flat_map(|g| g.products.iter())
    }

    /// Products in display order matching the filter's category and size.
    #[must_use]
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&ProductRecord> {
        self.display_order()
            .filter(|p| filter.category.as_deref().is_none_or(|c| p.category == c))
            .filter(|p| filter.size.as_deref().is_none_or(|s| p.offers_size(s)))
            .collect()
    }

    /// The first `n` products of the display order.
    #[must_use]
    pub fn featured(&self, n: usize) -> Vec<&ProductRecord> {
        self.display_order().take(n).collect()
    }

    /// Products in display order whose category matches `collection`.
    #[must_use]
    pub fn collection(&self, collection: &Collection) -> Vec<&ProductRecord> {
        self.display_order()
            .filter(|p| collection.matches(&p.category))
            .collect()
    }
}

/// Groups products by category (first-seen order), sorts each group's
/// products, then sorts the groups into display order.
#[must_use]
pub fn group_by_category(products: &[ProductRecord]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for product in products {
        let name = match product.category.trim() {
            "" => UNCATEGORIZED,
            trimmed => trimmed,
        };
        let pos = *positions.entry(name).or_insert_with(|| {
            groups.push(CategoryGroup::new(name));
            groups.len() - 1
        });
        groups[pos].push(product.clone());
    }

    for group in &mut groups {
        sort_products(&mut group.products);
    }
    sort_categories(&mut groups);
    groups
}

/// Stable in-category product order.
pub fn sort_products(products: &mut [ProductRecord]) {
    products.sort_by(compare_products);
}

#[must_use]
pub fn compare_products(a: &ProductRecord, b: &ProductRecord) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| b.priority_rank.total_cmp(&a.priority_rank))
        .then_with(|| a.name.cmp(&b.name))
}

/// Stable category display order.
pub fn sort_categories(groups: &mut [CategoryGroup]) {
    groups.sort_by(compare_categories);
}

#[must_use]
pub fn compare_categories(a: &CategoryGroup, b: &CategoryGroup) -> Ordering {
    tier(a).cmp(&tier(b)).then_with(|| {
        let by_priority = match (a.category_priority, b.category_priority) {
            (Some(pa), Some(pb)) => pa
                .total_cmp(&pb)
                .then_with(|| b.category_rank.total_cmp(&a.category_rank)),
            _ => Ordering::Equal,
        };
        by_priority.then_with(|| a.name.cmp(&b.name))
    })
}

fn tier(group: &CategoryGroup) -> u8 {
    if group.category_priority.is_some() {
        0
    } else if group.contains_priority_product {
        1
    } else {
        2
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
