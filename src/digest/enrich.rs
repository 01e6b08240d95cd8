use crate::types::{Category, Item, Selection};

/// Rewrites an item's description, typically with a language model.
///
/// Returning `None` keeps the existing description.
pub trait Enricher {
    fn describe(&self, category: Category, item: &Item) -> Option<String>;
}

/// Replace each pick's description with the enricher's, keeping the old text
/// in `original_description`.
pub fn enrich_selection<E: Enricher + ?Sized>(mut selection: Selection, enricher: &E) -> Selection {
    for pick in &mut selection.picks {
        match enricher.describe(pick.category, &pick.item) {
            Some(description) => {
                let previous = std::mem::replace(&mut pick.item.description, description);
                pick.item.original_description = Some(previous);
                tracing::debug!(category = %pick.category, "description enriched");
            }
            None => {
                tracing::warn!(
                    category = %pick.category,
                    "enrichment unavailable, keeping description"
                );
            }
        }
    }
    selection
}
