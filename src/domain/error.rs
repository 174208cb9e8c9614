// ============================================================
// Layer 3 — Split Errors
// ============================================================
// Every failure the splitting core can report.
//
// Policy:
//   - Configuration and consistency faults are hard stops
//   - Cache READ faults never show up here: they are turned
//     into a CacheLookup::Miss by the cache layer
//   - Cache WRITE faults propagate as CacheIo
//
// Nothing is retried automatically.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while computing, resolving or materialising a split.
#[derive(Debug, Error)]
pub enum SplitError {
    /// Split fractions or cache identifiers are invalid.
    #[error("invalid split configuration: {0}")]
    Config(String),

    /// Only validation data was requested (or nothing was held out).
    #[error(
        "unsupported split: val_split={val_split}, test_split={test_split} \
         (a held-out test fraction is required)"
    )]
    UnsupportedSplit { val_split: f64, test_split: f64 },

    /// The dataset has no records.
    #[error("dataset is empty")]
    EmptyDataset,

    /// Label sequence and dataset length disagree.
    #[error("label sequence has {labels} entries but the dataset has {records} records")]
    LabelLengthMismatch { labels: usize, records: usize },

    /// Resolved split does not fit the current dataset.
    #[error("split is inconsistent with the dataset: {0}")]
    Inconsistent(String),

    /// An index points past the end of the dataset.
    #[error("index {index} is out of range for a dataset of {len} records")]
    IndexOutOfRange { index: usize, len: usize },

    /// Creating the cache directory or writing the entry failed.
    #[error("cache I/O failed at '{}': {source}", .path.display())]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The split could not be encoded for the cache.
    #[error("cannot encode split entry: {0}")]
    CacheEncode(#[from] serde_json::Error),
}

impl SplitError {
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }

    pub fn inconsistent(reason: impl Into<String>) -> Self {
        Self::Inconsistent(reason.into())
    }

    pub fn cache_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheIo { path: path.into(), source }
    }
}

/// Result type for the splitting core.
pub type Result<T> = std::result::Result<T, SplitError>;

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message_names_fractions() {
        let err = SplitError::UnsupportedSplit { val_split: 0.2, test_split: 0.0 };
        let msg = err.to_string();
        assert!(msg.contains("val_split=0.2"));
        assert!(msg.contains("test_split=0"));
    }

    #[test]
    fn test_cache_io_keeps_path_and_source() {
        let io  = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SplitError::cache_io("/tmp/splits", io);
        assert!(err.to_string().contains("/tmp/splits"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_from_serde_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: SplitError = json_err.into();
        assert!(matches!(err, SplitError::CacheEncode(_)));
    }
}
