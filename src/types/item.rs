use serde::{Deserialize, Serialize};

use super::category::Category;
use super::identifiers::NormalizedKey;

/// A scored candidate produced by a source adapter.
///
/// `score` is opaque to selection: lists arrive pre-sorted, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub score: f64,
    pub category: Category,
    /// Set by enrichment when `description` has been rewritten.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_description: Option<String>,
}

impl Item {
    pub fn new(category: Category, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: String::new(),
            score: 0.0,
            category,
            original_description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// An item without a title cannot be deduplicated and is never selected.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn title_key(&self) -> NormalizedKey {
        NormalizedKey::new(&self.title)
    }

    /// `None` when the item has no URL.
    pub fn url_key(&self) -> Option<NormalizedKey> {
        NormalizedKey::non_empty(&self.url)
    }

    /// Text scanned for topic tags.
    pub fn topic_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}
