use std::collections::BTreeSet;

use crate::history::ExclusionSet;
use crate::topics::TopicTagSet;
use crate::types::{Item, NormalizedKey};

/// Why a candidate was passed over, in the order the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Invalid,
    History,
    Identity,
    Topic,
}

/// Normalized identity of a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateKeys {
    pub title: NormalizedKey,
    pub url: Option<NormalizedKey>,
}

impl CandidateKeys {
    pub fn of(item: &Item) -> Self {
        Self {
            title: item.title_key(),
            url: item.url_key(),
        }
    }
}

/// Titles, URLs and topics already claimed during one run.
#[derive(Debug, Default)]
pub struct RunLedger {
    titles: BTreeSet<NormalizedKey>,
    urls: BTreeSet<NormalizedKey>,
    topics: TopicTagSet,
}

impl RunLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// `topics` is `None` for categories that may overlap; they claim no topics.
    pub fn record(&mut self, keys: &CandidateKeys, topics: Option<&TopicTagSet>) {
        self.titles.insert(keys.title.clone());
        if let Some(url) = &keys.url {
            self.urls.insert(url.clone());
        }
        if let Some(topics) = topics {
            self.topics.extend(topics.iter().cloned());
        }
    }
}

pub fn require_title(item: &Item) -> Result<(), Rejection> {
    if item.is_valid() {
        Ok(())
    } else {
        Err(Rejection::Invalid)
    }
}

pub fn exclude_by_history(
    keys: &CandidateKeys,
    exclusions: &ExclusionSet,
) -> Result<(), Rejection> {
    let url_hit = keys.url.as_ref().is_some_and(|u| exclusions.contains(u));
    if exclusions.contains(&keys.title) || url_hit {
        Err(Rejection::History)
    } else {
        Ok(())
    }
}

pub fn exclude_by_identity(keys: &CandidateKeys, ledger: &RunLedger) -> Result<(), Rejection> {
    let url_hit = keys.url.as_ref().is_some_and(|u| ledger.urls.contains(u));
    if ledger.titles.contains(&keys.title) || url_hit {
        Err(Rejection::Identity)
    } else {
        Ok(())
    }
}

pub fn exclude_by_topic(topics: &TopicTagSet, ledger: &RunLedger) -> Result<(), Rejection> {
    if topics.is_disjoint(&ledger.topics) {
        Ok(())
    } else {
        Err(Rejection::Topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topics::TopicTag;
    use crate::types::Category;

    fn keys(title: &str, url: &str) -> CandidateKeys {
        CandidateKeys::of(&Item::new(Category::News, title, url))
    }

    #[test]
    fn empty_urls_never_collide() {
        let mut ledger = RunLedger::new();
        ledger.record(&keys("first", ""), None);
        assert_eq!(exclude_by_identity(&keys("second", ""), &ledger), Ok(()));
    }

    #[test]
    fn identity_matches_url_alone() {
        let mut ledger = RunLedger::new();
        ledger.record(&keys("first", "https://Example.com/a"), None);
        assert_eq!(
            exclude_by_identity(&keys("other title", " https://example.com/a "), &ledger),
            Err(Rejection::Identity)
        );
    }

    #[test]
    fn overlap_categories_claim_no_topics() {
        let mut ledger = RunLedger::new();
        let tags: TopicTagSet = [TopicTag::new("openai")].into_iter().collect();
        ledger.record(&keys("a", ""), None);
        assert_eq!(exclude_by_topic(&tags, &ledger), Ok(()));
        ledger.record(&keys("b", ""), Some(&tags));
        assert_eq!(exclude_by_topic(&tags, &ledger), Err(Rejection::Topic));
    }
}
