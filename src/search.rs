use crate::item_model::Item;

/// Items whose name, type or description contains `query`, ignoring case.
///
/// An empty query matches everything. Input order is preserved.
pub fn filter_items<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.matches_lowercase(&needle))
        .collect()
}
