use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::context::{
    check_windows, ContextError, DEFAULT_LOOKUP_WINDOW_DAYS, DEFAULT_RETENTION_DAYS,
};
use crate::topics::TopicTable;
use crate::types::Category;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Category listed more than once in category_order: {0}")]
    DuplicateCategory(Category),
    #[error(transparent)]
    Context(#[from] ContextError),
}

// Key point:
// Serializable
// Every field has an explicit default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    pub history_path: PathBuf,
    pub output_dir: PathBuf,
    pub lookup_window_days: u32,
    pub retention_days: u32,
    /// Processing order. Categories missing here are never selected.
    pub category_order: Vec<Category>,
    pub topic_overlap: BTreeSet<Category>,
    pub topics: TopicTable,
}

impl DigestConfig {
    pub fn v0() -> Self {
        Self {
            history_path: PathBuf::from("history.json"),
            output_dir: PathBuf::from("output"),
            lookup_window_days: DEFAULT_LOOKUP_WINDOW_DAYS,
            retention_days: DEFAULT_RETENTION_DAYS,
            category_order: Category::ALL.to_vec(),
            topic_overlap: Category::TOPIC_OVERLAP.into_iter().collect(),
            topics: TopicTable::default(),
        }
    }

    /// Read a JSON config file. Absent fields take their `v0` values.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let f = std::fs::File::open(path)?;
        let config: DigestConfig = serde_json::from_reader(f)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for category in &self.category_order {
            if !seen.insert(*category) {
                return Err(ConfigError::DuplicateCategory(*category));
            }
        }
        check_windows(self.lookup_window_days, self.retention_days)?;
        Ok(())
    }
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self::v0()
    }
}
