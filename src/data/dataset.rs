use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::domain::error::{Result, SplitError};
use crate::domain::traits::LabeledSource;

/// One record: a feature payload and its categorical label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSample<F, L> {
    pub features: F,
    pub label:    L,
}

impl<F, L> LabeledSample<F, L> {
    pub fn new(features: F, label: L) -> Self {
        Self { features, label }
    }
}

/// In-memory labelled dataset.
///
/// JSON form: `{"samples": [{"features": [...], "label": ...}, ...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledDataset<F, L> {
    samples: Vec<LabeledSample<F, L>>,
}

impl<F, L> LabeledDataset<F, L> {
    pub fn new(samples: Vec<LabeledSample<F, L>>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl<F, L> FromIterator<(F, L)> for LabeledDataset<F, L> {
    fn from_iter<I: IntoIterator<Item = (F, L)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(f, l)| LabeledSample::new(f, l)).collect())
    }
}

impl<F, L> Dataset<LabeledSample<F, L>> for LabeledDataset<F, L>
where
    F: Clone + Send + Sync,
    L: Clone + Send + Sync,
{
    fn get(&self, index: usize) -> Option<LabeledSample<F, L>> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

impl<F, L> LabeledSource for LabeledDataset<F, L>
where
    F: Clone + Send + Sync,
    L: Clone + Send + Sync,
{
    type Label    = L;
    type Features = Vec<F>;

    fn length(&self) -> usize {
        Dataset::len(self)
    }

    fn label_sequence(&self) -> Vec<L> {
        self.samples.iter().map(|s| s.label.clone()).collect()
    }

    fn feature_gather(&self, indices: &[usize]) -> Result<Vec<F>> {
        indices
            .iter()
            .map(|&index| {
                self.get(index)
                    .map(|sample| sample.features)
                    .ok_or(SplitError::IndexOutOfRange { index, len: self.samples.len() })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> LabeledDataset<Vec<f32>, String> {
        (0..5)
            .map(|i| (vec![i as f32, -(i as f32)], format!("class_{}", i % 2)))
            .collect()
    }

    #[test]
    fn test_gather_preserves_index_order() {
        let rows = toy().feature_gather(&[3, 0, 4]).unwrap();
        assert_eq!(rows, vec![vec![3.0, -3.0], vec![0.0, 0.0], vec![4.0, -4.0]]);
    }

    #[test]
    fn test_gather_out_of_range() {
        let err = toy().feature_gather(&[1, 5]).unwrap_err();
        assert!(matches!(err, SplitError::IndexOutOfRange { index: 5, len: 5 }));
    }

    #[test]
    fn test_label_sequence_matches_length() {
        let ds = toy();
        assert_eq!(ds.length(), 5);
        assert_eq!(ds.label_sequence()[3], "class_1");
    }

    #[test]
    fn test_json_form() {
        let ds: LabeledDataset<Vec<f32>, u8> = serde_json::from_str(
            r#"{"samples": [{"features": [0.5], "label": 1}, {"features": [1.5], "label": 0}]}"#,
        )
        .unwrap();
        assert_eq!(ds.sample_count(), 2);
        assert_eq!(ds.label_sequence(), vec![1, 0]);
    }
}
