use chrono::NaiveDate;

use super::store::{DayRecords, HistoryError, HistoryFile, HistoryStore, SelectionRecord};
use crate::config::{date_key, RunContext};
use crate::types::Selection;

/// Record `selection` under `date` and prune entries past retention.
///
/// Re-committing a date overwrites it. Only title and URL are kept.
pub fn commit(
    mut store: HistoryStore,
    ctx: &RunContext,
    date: NaiveDate,
    selection: &Selection,
) -> HistoryStore {
    let records: DayRecords = selection
        .picks
        .iter()
        .map(|pick| {
            (
                pick.category,
                SelectionRecord {
                    title: pick.item.title.clone(),
                    url: pick.item.url.clone(),
                },
            )
        })
        .collect();

    let key = date_key(date);
    let recorded = records.len();
    store.replace_day(key.clone(), records);

    let pruned = store.prune_before(&ctx.retention_cutoff());

    tracing::info!(date = %key, recorded, pruned, "selection committed to history");
    store
}

/// Owns the history document for the duration of a run.
///
/// Single writer: nothing here guards against two runs sharing a file.
#[derive(Debug, Clone)]
pub struct HistoryLifecycle {
    file: HistoryFile,
}

impl HistoryLifecycle {
    pub fn new(file: HistoryFile) -> Self {
        Self { file }
    }

    pub fn file(&self) -> &HistoryFile {
        &self.file
    }

    pub fn load(&self) -> HistoryStore {
        self.file.load()
    }

    /// Commit and persist. On error the returned store was never written and
    /// must not be treated as the current history.
    pub fn commit_and_save(
        &self,
        store: HistoryStore,
        ctx: &RunContext,
        date: NaiveDate,
        selection: &Selection,
    ) -> Result<HistoryStore, HistoryError> {
        let updated = commit(store, ctx, date, selection);
        self.file.save(&updated)?;
        Ok(updated)
    }
}
