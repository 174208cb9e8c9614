// ============================================================
// Layer 4 — Split Materializer
// ============================================================
// Turns index lists back into data:
//
//   SplitResult { train, val, test }
//       │   feature_gather + label lookup, index order kept
//       ▼
//   (train_X, train_y, test_X, test_y, val_X, val_y)
//
// val may be empty; its slots are then empty containers, so
// the six-way shape never changes with the configuration.

use crate::domain::{
    error::{Result, SplitError},
    split_result::SplitResult,
    traits::LabeledSource,
};

/// Features and labels for each partition of a split.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterializedSplit<X, Y> {
    pub train_x: X,
    pub train_y: Vec<Y>,
    pub test_x:  X,
    pub test_y:  Vec<Y>,
    pub val_x:   X,
    pub val_y:   Vec<Y>,
}

impl<X, Y> MaterializedSplit<X, Y> {
    /// `(train_X, train_y, test_X, test_y, val_X, val_y)`
    pub fn into_tuple(self) -> (X, Vec<Y>, X, Vec<Y>, X, Vec<Y>) {
        (self.train_x, self.train_y, self.test_x, self.test_y, self.val_x, self.val_y)
    }
}

/// Gather every partition of `split` out of `dataset`.
///
/// Reads the label sequence once. Fails with `IndexOutOfRange` if the
/// split references a record the dataset does not have, which only
/// happens when the consistency check was skipped.
pub fn materialize<D: LabeledSource>(
    dataset: &D,
    split:   &SplitResult,
) -> Result<MaterializedSplit<D::Features, D::Label>> {
    let labels = dataset.label_sequence();

    let gather_labels = |indices: &[usize]| -> Result<Vec<D::Label>> {
        indices
            .iter()
            .map(|&index| {
                labels
                    .get(index)
                    .cloned()
                    .ok_or(SplitError::IndexOutOfRange { index, len: labels.len() })
            })
            .collect()
    };

    let materialized = MaterializedSplit {
        train_x: dataset.feature_gather(&split.train)?,
        train_y: gather_labels(&split.train)?,
        test_x:  dataset.feature_gather(&split.test)?,
        test_y:  gather_labels(&split.test)?,
        val_x:   dataset.feature_gather(&split.val)?,
        val_y:   gather_labels(&split.val)?,
    };

    tracing::debug!(
        "Materialized {} train, {} val, {} test records",
        materialized.train_y.len(),
        materialized.val_y.len(),
        materialized.test_y.len(),
    );

    Ok(materialized)
}
