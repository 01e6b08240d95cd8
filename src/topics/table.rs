use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A coarse subject label, e.g. a company or product family.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicTag(String);

impl TopicTag {
    pub fn new(tag: impl Into<String>) -> Self {
        TopicTag(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub type TopicTagSet = BTreeSet<TopicTag>;

pub trait TopicExtractor {
    fn extract(&self, text: &str) -> TopicTagSet;
}

/// Fixed tag -> keywords table matched by case-insensitive substring search.
///
/// No tokenization: "opus" also matches inside "magnum opus". That is
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicTable {
    entries: BTreeMap<TopicTag, Vec<String>>,
}

impl TopicTable {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert<I, S>(&mut self, tag: impl Into<String>, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords = keywords.into_iter().map(|k| k.into().to_lowercase()).collect();
        self.entries.insert(TopicTag::new(tag), keywords);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TopicTable {
    fn default() -> Self {
        let mut table = TopicTable::new();
        table.insert("claude", ["claude", "anthropic", "opus"]);
        table.insert("openai", ["openai", "chatgpt", "gpt-", "codex"]);
        table
    }
}

impl TopicExtractor for TopicTable {
    fn extract(&self, text: &str) -> TopicTagSet {
        let text_lower = text.to_lowercase();
        self.entries
            .iter()
            .filter(|(_, keywords)| {
                // Tables loaded from config may carry mixed-case keywords
                keywords
                    .iter()
                    .any(|kw| !kw.is_empty() && text_lower.contains(&kw.to_lowercase()))
            })
            .map(|(tag, _)| tag.clone())
            .collect()
    }
}
