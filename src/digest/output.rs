use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::date_key;
use crate::types::{Candidates, Selection, SelectionVersion};

pub const DIGEST_FILE_NAME: &str = "data.json";

#[derive(Debug, Error)]
pub enum DigestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Digest date {found} does not match directory date {expected}")]
    DateMismatch { expected: String, found: String },
}

/// One day's output: every candidate list and the final selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDigest {
    pub date: String,
    pub fetched_at: DateTime<Utc>, // informational only
    pub selection_version: SelectionVersion,
    pub categories: Candidates,
    pub selected: Selection,
}

impl DailyDigest {
    pub fn new(date: NaiveDate, categories: Candidates, selected: Selection) -> Self {
        Self {
            date: date_key(date),
            fetched_at: Utc::now(),
            selection_version: selected.version(),
            categories,
            selected,
        }
    }

    /// `<output_dir>/<date>/data.json`
    pub fn path_for(output_dir: &Path, date: NaiveDate) -> PathBuf {
        output_dir.join(date_key(date)).join(DIGEST_FILE_NAME)
    }

    /// Write to `<output_dir>/<date>/data.json`, replacing any earlier run.
    pub fn write(&self, output_dir: &Path) -> Result<PathBuf, DigestError> {
        let day_dir = output_dir.join(&self.date);
        fs::create_dir_all(&day_dir)?;

        let path = day_dir.join(DIGEST_FILE_NAME);
        let temp_path = path.with_extension("json.tmp");
        {
            let f = fs::File::create(&temp_path)?;
            serde_json::to_writer_pretty(&f, self)?;
            f.sync_all()?;
        }
        fs::rename(&temp_path, &path)?;

        tracing::info!(
            path = %path.display(),
            picks = self.selected.len(),
            version = %self.selection_version.as_str(),
            "digest written"
        );
        Ok(path)
    }

    pub fn read(output_dir: &Path, date: NaiveDate) -> Result<Self, DigestError> {
        let path = Self::path_for(output_dir, date);
        let f = fs::File::open(&path)?;
        let digest: DailyDigest = serde_json::from_reader(f)?;

        let expected = date_key(date);
        if digest.date != expected {
            return Err(DigestError::DateMismatch {
                expected,
                found: digest.date,
            });
        }
        Ok(digest)
    }
}
