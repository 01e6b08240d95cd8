use serde::{Deserialize, Serialize};

use super::category::Category;
use super::identifiers::SelectionVersion;
use super::item::Item;

/// One category's candidates, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateList {
    pub category: Category,
    pub items: Vec<Item>,
}

/// Candidate lists in processing order.
///
/// Order is significant: earlier categories claim titles and topics first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidates {
    lists: Vec<CandidateList>,
}

impl Candidates {
    pub fn new() -> Self {
        Self { lists: Vec::new() }
    }

    /// Append a list, or replace an earlier list for the same category in place.
    pub fn push(&mut self, category: Category, items: Vec<Item>) {
        match self.lists.iter_mut().find(|l| l.category == category) {
            Some(existing) => existing.items = items,
            None => self.lists.push(CandidateList { category, items }),
        }
    }

    pub fn with(mut self, category: Category, items: Vec<Item>) -> Self {
        self.push(category, items);
        self
    }

    pub fn get(&self, category: Category) -> Option<&[Item]> {
        self.lists
            .iter()
            .find(|l| l.category == category)
            .map(|l| l.items.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateList> {
        self.lists.iter()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn total_items(&self) -> usize {
        self.lists.iter().map(|l| l.items.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickKind {
    /// Passed every filter.
    Fresh,
    /// Nothing passed; the top valid candidate was taken anyway.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    pub category: Category,
    pub kind: PickKind,
    pub item: Item,
}

/// Why candidates of one category were passed over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTrace {
    pub considered: usize,
    pub rejected_by_history: usize,
    pub rejected_by_identity: usize,
    pub rejected_by_topic: usize,
    pub skipped_invalid: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOutcome {
    pub category: Category,
    pub outcome: Option<PickKind>,
    pub trace: CategoryTrace,
}

/// Today's picks in processing order, plus an explanation per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub picks: Vec<Pick>,
    pub outcomes: Vec<CategoryOutcome>,
}

impl Selection {
    pub fn get(&self, category: Category) -> Option<&Item> {
        self.picks
            .iter()
            .find(|p| p.category == category)
            .map(|p| &p.item)
    }

    pub fn pick(&self, category: Category) -> Option<&Pick> {
        self.picks.iter().find(|p| p.category == category)
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.picks.iter().map(|p| p.category)
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn fallback_count(&self) -> usize {
        self.picks
            .iter()
            .filter(|p| p.kind == PickKind::Fallback)
            .count()
    }

    /// Hash of the picked categories, titles and URLs, in pick order.
    /// Descriptions are excluded so enrichment does not change the version.
    pub fn version(&self) -> SelectionVersion {
        SelectionVersion::from_lines(
            self.picks
                .iter()
                .map(|p| (p.category.as_str(), p.item.title.as_str(), p.item.url.as_str())),
        )
    }
}
