use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::context::cutoff_key;
use crate::config::RunContext;
use crate::types::{Category, NormalizedKey};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// What is remembered about one category's pick on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

pub type DayRecords = BTreeMap<Category, SelectionRecord>;

/// Past selections keyed by ISO date.
///
/// Only the lifecycle manager mutates a store; selection reads the derived
/// [`ExclusionSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStore {
    #[serde(default)]
    selections: BTreeMap<String, DayRecords>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, date: &str) -> Option<&DayRecords> {
        self.selections.get(date)
    }

    /// Date keys, oldest first.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.selections.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub(crate) fn replace_day(&mut self, date: String, records: DayRecords) {
        self.selections.insert(date, records);
    }

    /// Drop every date strictly before `cutoff`. Returns how many were dropped.
    pub(crate) fn prune_before(&mut self, cutoff: &str) -> usize {
        let before = self.selections.len();
        self.selections.retain(|date, _| date.as_str() >= cutoff);
        before - self.selections.len()
    }

    /// Titles and URLs picked on or after `today - window_days`.
    ///
    /// Date keys are zero-padded ISO 8601, so string comparison suffices.
    pub fn exclusion_set(&self, today: NaiveDate, window_days: u32) -> ExclusionSet {
        let cutoff = cutoff_key(today, window_days);
        let mut keys = BTreeSet::new();
        for (_, records) in self.selections.range(cutoff..) {
            for record in records.values() {
                keys.insert(NormalizedKey::new(&record.title));
                if let Some(url) = NormalizedKey::non_empty(&record.url) {
                    keys.insert(url);
                }
            }
        }
        ExclusionSet { keys }
    }

    pub fn recent_exclusions(&self, ctx: &RunContext) -> ExclusionSet {
        self.exclusion_set(ctx.today(), ctx.lookup_window_days())
    }
}

/// Normalized titles and URLs that may not be picked again this run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    keys: BTreeSet<NormalizedKey>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &NormalizedKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<NormalizedKey> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = NormalizedKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// The JSON document backing a [`HistoryStore`].
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: a missing or unreadable document is an empty history.
    ///
    /// Records that do not parse (unknown category, `null`, wrong shape) are
    /// dropped one by one; the rest of the document is kept.
    pub fn load(&self) -> HistoryStore {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no history file, starting empty");
            return HistoryStore::new();
        }

        let parsed = fs::read(&self.path)
            .map_err(HistoryError::from)
            .and_then(|bytes| {
                serde_json::from_slice::<RawHistory>(&bytes).map_err(HistoryError::from)
            });

        match parsed {
            Ok(raw) => {
                let store = salvage(raw);
                tracing::debug!(path = %self.path.display(), days = store.len(), "history loaded");
                store
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "history unreadable, starting empty"
                );
                HistoryStore::new()
            }
        }
    }

    /// Write the whole document, replacing the previous one atomically.
    pub fn save(&self, store: &HistoryStore) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("json.tmp");
        {
            let f = fs::File::create(&temp_path)?;
            serde_json::to_writer_pretty(&f, store)?;
            f.sync_all()?;
        }
        fs::rename(&temp_path, &self.path)?;

        tracing::info!(path = %self.path.display(), days = store.len(), "history saved");
        Ok(())
    }
}

/// The history document before per-record validation.
#[derive(Debug, Default, Deserialize)]
struct RawHistory {
    #[serde(default)]
    selections: BTreeMap<String, serde_json::Value>,
}

fn salvage(raw: RawHistory) -> HistoryStore {
    let mut store = HistoryStore::new();
    for (date, day) in raw.selections {
        let serde_json::Value::Object(entries) = day else {
            tracing::warn!(%date, "history day is not an object, dropping it");
            continue;
        };

        let mut records = DayRecords::new();
        for (key, value) in entries {
            let category =
                serde_json::from_value::<Category>(serde_json::Value::String(key.clone()));
            let record = serde_json::from_value::<SelectionRecord>(value);
            match (category, record) {
                (Ok(category), Ok(record)) => {
                    records.insert(category, record);
                }
                (Err(e), _) | (_, Err(e)) => {
                    tracing::warn!(%date, category = %key, error = %e, "dropping history record");
                }
            }
        }

        if !records.is_empty() {
            store.replace_day(date, records);
        }
    }
    store
}
