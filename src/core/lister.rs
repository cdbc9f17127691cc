//! Client-side narrowing of a fetched collection

use crate::core::item::Item;

/// Keep only items whose name contains `filter`, ignoring case
///
/// A missing or blank filter keeps everything. Order is preserved.
pub fn filter_items(items: Vec<Item>, filter: Option<&str>) -> Vec<Item> {
    let needle = match filter.map(str::trim) {
        Some(f) if !f.is_empty() => f.to_lowercase(),
        _ => return items,
    };

    items
        .into_iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .collect()
}
