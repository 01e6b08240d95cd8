use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A lower-cased, trimmed title or URL used for identity comparisons.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn new(raw: &str) -> Self {
        NormalizedKey(raw.trim().to_lowercase())
    }

    /// Normalize, discarding values that are empty after trimming.
    pub fn non_empty(raw: &str) -> Option<Self> {
        let key = Self::new(raw);
        if key.0.is_empty() {
            None
        } else {
            Some(key)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Content hash of a day's selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionVersion(String);

impl SelectionVersion {
    /// Hash `category:title:url` lines in the given order.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>) -> Self {
        let mut hasher = Sha256::new();
        for (category, title, url) in lines {
            let line = format!("{category}:{title}:{url}\n");
            hasher.update(line.as_bytes());
        }

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        SelectionVersion(format!("sha256:{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_trims_and_lowercases() {
        assert_eq!(NormalizedKey::new("  Model X Launches ").as_str(), "model x launches");
    }

    #[test]
    fn blank_values_have_no_key() {
        assert!(NormalizedKey::non_empty("   ").is_none());
        assert!(NormalizedKey::non_empty("").is_none());
    }

    #[test]
    fn version_has_sha256_prefix() {
        let v = SelectionVersion::from_lines([("news", "a", "https://a")]);
        assert!(v.as_str().starts_with("sha256:"));
        assert_eq!(v.as_str().len(), "sha256:".len() + 64);
    }
}
