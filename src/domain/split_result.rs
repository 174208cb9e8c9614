// ============================================================
// Layer 3 — SplitResult
// ============================================================
// Three ordered index lists into the dataset:
//
//   train — indices used to fit the model
//   val   — indices used for model selection (may be empty)
//   test  — indices used for the final evaluation
//
// Invariants of a fresh (uncapped) split over N records:
//   - train.len() + val.len() + test.len() == N
//   - no index appears twice, within or across lists
//   - every index is in [0, N)
//
// The order inside each list is the shuffled order the split
// was produced in. It is never sorted, because downstream code
// (few-shot truncation, batching) depends on it.
//
// The same struct is the on-disk cache format:
//   {"train": [...], "val": [...], "test": [...]}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::{Result, SplitError};

/// A train/val/test partition expressed as dataset indices.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SplitResult {
    pub train: Vec<usize>,
    pub val:   Vec<usize>,
    pub test:  Vec<usize>,
}

impl SplitResult {
    pub fn new(train: Vec<usize>, val: Vec<usize>, test: Vec<usize>) -> Self {
        Self { train, val, test }
    }

    /// Number of indices across all three partitions.
    pub fn total(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }

    /// All indices in train, val, test order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.train.iter()
            .chain(self.val.iter())
            .chain(self.test.iter())
            .copied()
    }

    pub fn summary(&self) -> SplitSummary {
        SplitSummary {
            train: self.train.len(),
            val:   self.val.len(),
            test:  self.test.len(),
        }
    }

    /// Keep only the first `cap` train indices. val and test are untouched.
    pub fn apply_fewshot(&mut self, cap: Option<usize>) {
        if let Some(cap) = cap {
            self.train.truncate(cap);
        }
    }

    /// Check that this split still describes a dataset of `n` records.
    ///
    /// The split must cover exactly `n` indices, each in range and
    /// appearing once. Run it on the uncapped split, before
    /// `apply_fewshot`.
    ///
    /// A failure here almost always means the cached entry was built
    /// against a different version of the dataset and must be deleted
    /// or regenerated.
    pub fn ensure_consistent(&self, n: usize) -> Result<()> {
        let total = self.total();
        if total != n {
            return Err(SplitError::inconsistent(format!(
                "split covers {total} indices but the dataset has {n} records"
            )));
        }

        let mut seen = vec![false; n];
        for index in self.indices() {
            if index >= n {
                return Err(SplitError::inconsistent(format!(
                    "index {index} is outside a dataset of {n} records"
                )));
            }
            if std::mem::replace(&mut seen[index], true) {
                return Err(SplitError::inconsistent(format!(
                    "index {index} appears more than once"
                )));
            }
        }

        Ok(())
    }
}

// ─── SplitSummary ─────────────────────────────────────────────────────────────
/// Partition sizes, used for logging and for comparing against
/// the sizes the current ratios would produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSummary {
    pub train: usize,
    pub val:   usize,
    pub test:  usize,
}

impl SplitSummary {
    pub fn total(&self) -> usize {
        self.train + self.val + self.test
    }

    fn percent(&self, count: usize) -> f64 {
        (count as f64 * 100.0) / self.total().max(1) as f64
    }
}

impl fmt::Display for SplitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "train={} ({:.1}%), val={} ({:.1}%), test={} ({:.1}%)",
            self.train, self.percent(self.train),
            self.val,   self.percent(self.val),
            self.test,  self.percent(self.test),
        )
    }
}
