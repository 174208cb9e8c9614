// ============================================================
// Layer 3 — Split Configuration
// ============================================================
// Everything a caller can say about how a dataset is split
// and where the split is cached.
//
// Ratios:
//   val_split   — fraction held out for validation   (default 0)
//   test_split  — fraction held out for testing      (default 0)
//   train_split — only checked, never used to size
//                 the train set (default 1 - val - test)
//
// Cache identity:
//   cache_root / dataset_name / subject / run_a_run_b / splits.json
//
// NOTE: ratios and train_fewshot are NOT part of the cache key.
// Changing them against an existing entry returns the old split.
//
// Reference: Rust Book §5 (Structs), serde documentation

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::error::{Result, SplitError};

/// Slack allowed when comparing fractions, so 0.1 + 0.2 + 0.7 counts as 1.
pub const FRACTION_TOLERANCE: f64 = 1e-9;

/// File name of a persisted split inside its key directory.
pub const SPLIT_FILE_NAME: &str = "splits.json";

/// Split ratios, few-shot cap and cache identity for one split operation.
///
/// Deserialises from JSON with every field optional; unknown keys
/// are ignored so a larger experiment config can be passed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub val_split:       f64,
    pub test_split:      f64,
    pub train_split:     Option<f64>,
    pub train_fewshot:   Option<usize>,
    pub cache_root:      Option<PathBuf>,
    pub dataset_name:    Option<String>,
    pub subject:         Option<String>,
    pub run_identifiers: Vec<String>,

    /// Ignore any cached entry, recompute and overwrite it
    pub reload_split:  bool,

    /// Treat cached sizes that disagree with the requested ratios as an error
    pub strict_ratios: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            val_split:       0.0,
            test_split:      0.0,
            train_split:     None,
            train_fewshot:   None,
            cache_root:      None,
            dataset_name:    None,
            subject:         None,
            run_identifiers: Vec::new(),
            reload_split:    false,
            strict_ratios:   false,
        }
    }
}

impl SplitConfig {
    /// Config with the given held-out fractions and everything else defaulted.
    pub fn with_fractions(val_split: f64, test_split: f64) -> Self {
        Self { val_split, test_split, ..Self::default() }
    }

    /// Parse a JSON config document.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The effective train fraction: explicit value or `1 - val - test`.
    pub fn train_fraction(&self) -> f64 {
        self.train_split
            .unwrap_or(1.0 - self.val_split - self.test_split)
    }

    /// Fraction of the dataset that leaves the train group.
    pub fn held_out_fraction(&self) -> f64 {
        self.val_split + self.test_split
    }

    /// Check the fraction preconditions.
    ///
    /// Fails with `SplitError::Config` when a held-out fraction is
    /// outside `[0, 1)`, when `train_split <= 0`, or when the three
    /// fractions add up to more than 1.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("val_split", self.val_split), ("test_split", self.test_split)] {
            if !(0.0..1.0).contains(&value) {
                return Err(SplitError::config(format!(
                    "{name} must be in [0, 1), got {value}"
                )));
            }
        }

        let train = self.train_fraction();
        if train.is_nan() || train <= 0.0 {
            return Err(SplitError::config(format!(
                "train_split must be positive, got {train}"
            )));
        }

        let total = self.val_split + self.test_split + train;
        if total > 1.0 + FRACTION_TOLERANCE {
            return Err(SplitError::config(format!(
                "val_split + test_split + train_split must not exceed 1, got {total}"
            )));
        }

        Ok(())
    }

    /// The cache key, or `None` when no cache root is configured.
    ///
    /// A configured root without `dataset_name` or `subject` is an error:
    /// there would be no way to tell datasets apart on disk.
    pub fn cache_key(&self) -> Result<Option<CacheKey>> {
        if self.cache_root.is_none() {
            return Ok(None);
        }

        let dataset_name = self.dataset_name.clone().ok_or_else(|| {
            SplitError::config("cache_root is set but dataset_name is missing")
        })?;
        let subject = self.subject.clone().ok_or_else(|| {
            SplitError::config("cache_root is set but subject is missing")
        })?;

        Ok(Some(CacheKey {
            dataset_name,
            subject,
            run_identifiers: self.run_identifiers.clone(),
        }))
    }
}

// ─── CacheKey ─────────────────────────────────────────────────────────────────
/// Identity of a persisted split: (dataset_name, subject, run_identifiers).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub dataset_name:    String,
    pub subject:         String,
    pub run_identifiers: Vec<String>,
}

impl CacheKey {
    pub fn new(
        dataset_name:    impl Into<String>,
        subject:         impl Into<String>,
        run_identifiers: Vec<String>,
    ) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            subject:      subject.into(),
            run_identifiers,
        }
    }

    /// `{root}/{dataset_name}/{subject}/{runs joined by '_'}`
    pub fn directory(&self, root: &Path) -> PathBuf {
        root.join(&self.dataset_name)
            .join(&self.subject)
            .join(self.run_identifiers.join("_"))
    }

    /// Full path of the entry file under `root`.
    pub fn entry_path(&self, root: &Path) -> PathBuf {
        self.directory(root).join(SPLIT_FILE_NAME)
    }
}
