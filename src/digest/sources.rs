use std::cmp::Ordering;

use crate::types::{Candidates, Category, Item};

/// Something that produces one category's scored candidates, best first.
pub trait CandidateSource {
    fn category(&self) -> Category;

    fn fetch(&self) -> Vec<Item>;
}

/// Fetch every source and lay the lists out in `order`.
///
/// A category in `order` with no source gets an empty list. Sources for
/// categories missing from `order` are not fetched. When several sources
/// serve one category their lists are merged by descending score; equal
/// scores keep source order.
pub fn gather_candidates(sources: &[&dyn CandidateSource], order: &[Category]) -> Candidates {
    let mut candidates = Candidates::new();
    for &category in order {
        let mut items = Vec::new();
        let mut served_by = 0;
        for source in sources.iter().filter(|s| s.category() == category) {
            let fetched = source.fetch();
            tracing::debug!(%category, count = fetched.len(), "candidates fetched");
            items.extend(fetched);
            served_by += 1;
        }
        if served_by > 1 {
            items.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        }
        if items.is_empty() {
            tracing::warn!(%category, "no candidates found");
        }
        candidates.push(category, items);
    }
    candidates
}
