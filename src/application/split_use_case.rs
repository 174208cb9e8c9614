// ============================================================
// Layer 2 — SplitUseCase
// ============================================================
// Orchestrates one split of one dataset:
//
//   Step 1: Read length + labels      (Layer 3 - LabeledSource)
//   Step 2: Load or compute the split (Layer 6 - split cache)
//   Step 3: Consistency check         (Layer 3 - SplitResult)
//   Step 4: Few-shot cap on train     (Layer 3 - SplitResult)
//   Step 5: Ratio check (cached only) (Layer 4 - splitter sizes)
//   Step 6: Gather features + labels  (Layer 4 - materializer)
//
// Step 3 is what catches a cache entry written for an older,
// differently sized version of the dataset. It is a hard error:
// the entry has to be deleted or regenerated by hand. It runs on
// the uncapped split, so it is exact whether or not a few-shot
// cap is configured.
//
// Step 5 exists because the cache key ignores the ratios. A
// cached split whose sizes differ from what the current ratios
// would produce is logged as a warning, or rejected when
// strict_ratios is set.

use crate::data::{
    materializer::{materialize, MaterializedSplit},
    splitter,
};
use crate::domain::{
    error::{Result, SplitError},
    split_config::SplitConfig,
    split_result::{SplitResult, SplitSummary},
    traits::LabeledSource,
};
use crate::infra::split_cache::{resolve_with_origin, SplitOrigin};

/// A split that passed the consistency check, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSplit {
    pub split:  SplitResult,
    pub origin: SplitOrigin,
}

impl ResolvedSplit {
    pub fn summary(&self) -> SplitSummary {
        self.split.summary()
    }
}

// ─── SplitUseCase ─────────────────────────────────────────────────────────────
pub struct SplitUseCase {
    config: SplitConfig,
}

impl SplitUseCase {
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    /// Steps 1–5: the validated index lists for `dataset`.
    pub fn resolve<D: LabeledSource>(&self, dataset: &D) -> Result<ResolvedSplit> {
        let cfg    = &self.config;
        let n      = dataset.length();
        let labels = dataset.label_sequence();

        let (mut split, origin) = resolve_with_origin(n, &labels, cfg)?;

        split.ensure_consistent(n).map_err(|e| {
            tracing::error!(
                "Resolved split does not match the dataset ({:?}); delete or regenerate it",
                origin
            );
            e
        })?;

        split.apply_fewshot(cfg.train_fewshot);

        if matches!(origin, SplitOrigin::Cached(_)) {
            check_ratios(&split, n, cfg)?;
        }

        tracing::info!("Split ready: {}", split.summary());
        Ok(ResolvedSplit { split, origin })
    }

    /// All six steps: `(train_X, train_y, test_X, test_y, val_X, val_y)`.
    pub fn execute<D: LabeledSource>(
        &self,
        dataset: &D,
    ) -> Result<MaterializedSplit<D::Features, D::Label>> {
        let resolved = self.resolve(dataset)?;
        materialize(dataset, &resolved.split)
    }
}

/// Resolve, validate and materialize `dataset` under `config` in one call.
pub fn split_dataset<D: LabeledSource>(
    dataset: &D,
    config:  &SplitConfig,
) -> Result<MaterializedSplit<D::Features, D::Label>> {
    SplitUseCase::new(config.clone()).execute(dataset)
}

/// Compare a cached split's sizes with what the current ratios would give.
fn check_ratios(split: &SplitResult, n: usize, cfg: &SplitConfig) -> Result<()> {
    let found    = split.summary();
    let expected = splitter::planned_sizes(n, cfg);
    if found == expected {
        return Ok(());
    }

    let message = format!(
        "cached split has {found} but val_split={}, test_split={} would give {expected}",
        cfg.val_split, cfg.test_split
    );

    if cfg.strict_ratios {
        Err(SplitError::inconsistent(message))
    } else {
        tracing::warn!("{}", message);
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::LabeledDataset;
    use crate::infra::split_cache::SplitCache;
    use crate::domain::split_config::CacheKey;
    use tempfile::TempDir;

    fn dataset(n: usize) -> LabeledDataset<Vec<f32>, u8> {
        (0..n).map(|i| (vec![i as f32; 4], (i % 3) as u8)).collect()
    }

    fn cached_config(root: &std::path::Path, val: f64, test: f64) -> SplitConfig {
        SplitConfig {
            cache_root:      Some(root.to_path_buf()),
            dataset_name:    Some("movies".into()),
            subject:         Some("sub_2".into()),
            run_identifiers: vec!["trial001".into()],
            ..SplitConfig::with_fractions(val, test)
        }
    }

    #[test]
    fn test_execute_without_cache() {
        let out = split_dataset(&dataset(100), &SplitConfig::with_fractions(0.1, 0.2)).unwrap();
        assert_eq!(out.train_x.len(), 70);
        assert_eq!(out.val_y.len(),   10);
        assert_eq!(out.test_y.len(),  20);
    }

    #[test]
    fn test_features_and_labels_stay_aligned() {
        let out = split_dataset(&dataset(60), &SplitConfig::with_fractions(0.0, 0.25)).unwrap();
        for (row, label) in out.train_x.iter().zip(&out.train_y) {
            assert_eq!((row[0] as usize % 3) as u8, *label);
        }
    }

    #[test]
    fn test_grown_dataset_is_inconsistent() {
        let tmp = TempDir::new().unwrap();
        let cfg = cached_config(tmp.path(), 0.1, 0.2);
        let use_case = SplitUseCase::new(cfg);

        use_case.resolve(&dataset(100)).unwrap();
        let err = use_case.resolve(&dataset(120)).unwrap_err();
        assert!(matches!(err, SplitError::Inconsistent(_)));
    }

    #[test]
    fn test_cached_split_is_reused() {
        let tmp = TempDir::new().unwrap();
        let use_case = SplitUseCase::new(cached_config(tmp.path(), 0.1, 0.2));

        let first  = use_case.resolve(&dataset(100)).unwrap();
        let second = use_case.resolve(&dataset(100)).unwrap();
        assert!(matches!(second.origin, SplitOrigin::Cached(_)));
        assert_eq!(first.split, second.split);
    }

    #[test]
    fn test_ratio_drift_warns_by_default() {
        let tmp = TempDir::new().unwrap();
        SplitUseCase::new(cached_config(tmp.path(), 0.1, 0.2))
            .resolve(&dataset(100))
            .unwrap();

        // Different ratios, same key: the stored split comes back
        let resolved = SplitUseCase::new(cached_config(tmp.path(), 0.0, 0.5))
            .resolve(&dataset(100))
            .unwrap();
        assert_eq!(resolved.summary(), SplitSummary { train: 70, val: 10, test: 20 });
    }

    #[test]
    fn test_ratio_drift_rejected_when_strict() {
        let tmp = TempDir::new().unwrap();
        SplitUseCase::new(cached_config(tmp.path(), 0.1, 0.2))
            .resolve(&dataset(100))
            .unwrap();

        let mut cfg = cached_config(tmp.path(), 0.0, 0.5);
        cfg.strict_ratios = true;
        let err = SplitUseCase::new(cfg).resolve(&dataset(100)).unwrap_err();
        assert!(matches!(err, SplitError::Inconsistent(_)));
    }

    #[test]
    fn test_fewshot_cached_split_passes_check() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = cached_config(tmp.path(), 0.1, 0.2);
        cfg.train_fewshot = Some(8);
        let use_case = SplitUseCase::new(cfg);

        use_case.resolve(&dataset(100)).unwrap();
        let resolved = use_case.resolve(&dataset(100)).unwrap();
        assert_eq!(resolved.summary(), SplitSummary { train: 8, val: 10, test: 20 });
    }

    #[test]
    fn test_grown_dataset_is_inconsistent_with_fewshot() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = cached_config(tmp.path(), 0.1, 0.2);
        cfg.train_fewshot = Some(8);
        let use_case = SplitUseCase::new(cfg);

        use_case.resolve(&dataset(100)).unwrap();
        let err = use_case.resolve(&dataset(120)).unwrap_err();
        assert!(matches!(err, SplitError::Inconsistent(_)));
    }

    #[test]
    fn test_changing_fewshot_reuses_cached_train_order() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = cached_config(tmp.path(), 0.1, 0.2);
        cfg.train_fewshot = Some(8);
        let small = SplitUseCase::new(cfg.clone()).resolve(&dataset(100)).unwrap();

        cfg.train_fewshot = Some(20);
        let large = SplitUseCase::new(cfg).resolve(&dataset(100)).unwrap();

        assert!(matches!(large.origin, SplitOrigin::Cached(_)));
        assert_eq!(large.split.train.len(), 20);
        assert_eq!(small.split.train, large.split.train[..8]);
    }

    #[test]
    fn test_duplicate_cached_index_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let cfg = cached_config(tmp.path(), 0.0, 0.5);
        let key = CacheKey::new("movies", "sub_2", vec!["trial001".into()]);
        SplitCache::new(tmp.path())
            .store(&key, &SplitResult::new(vec![0, 1], vec![], vec![1, 2]))
            .unwrap();

        let err = SplitUseCase::new(cfg).resolve(&dataset(4)).unwrap_err();
        assert!(matches!(err, SplitError::Inconsistent(_)));
    }
}
