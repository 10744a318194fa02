//! Linear substring filter over the catalog.

use crate::catalog::Product;
use crate::normalize::{normalize, normalize_opt};

/// Products whose folded name contains the folded `query`, in catalog order.
/// An empty (after folding) query keeps every product.
pub fn filter<'a>(catalog: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = normalize(query);
    if query.is_empty() {
        return catalog.iter().collect();
    }
    catalog
        .iter()
        .filter(|p| normalize_opt(p.name.as_deref()).contains(&query))
        .collect()
}
