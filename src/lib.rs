//! Deterministic, cached train/validation/test splitting for labelled datasets.
//!
//! ```no_run
//! use dataset_split::application::split_use_case::split_dataset;
//! use dataset_split::data::dataset::LabeledDataset;
//! use dataset_split::domain::split_config::SplitConfig;
//!
//! let dataset: LabeledDataset<Vec<f32>, u8> =
//!     (0..100).map(|i| (vec![i as f32], (i % 2) as u8)).collect();
//!
//! let mut config = SplitConfig::with_fractions(0.1, 0.2);
//! config.cache_root   = Some("saved_splits".into());
//! config.dataset_name = Some("toy".into());
//! config.subject      = Some("sub_1".into());
//!
//! let (train_x, train_y, test_x, test_y, val_x, val_y) =
//!     split_dataset(&dataset, &config).unwrap().into_tuple();
//! ```

pub mod application;
pub mod data;
pub mod domain;
pub mod infra;

pub use application::split_use_case::{split_dataset, ResolvedSplit, SplitUseCase};
pub use data::materializer::MaterializedSplit;
pub use domain::{
    error::{Result, SplitError},
    split_config::SplitConfig,
    split_result::SplitResult,
    traits::LabeledSource,
};
