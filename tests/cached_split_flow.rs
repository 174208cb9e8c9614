//! End-to-end: resolve through the on-disk cache, validate against the
//! dataset, materialize the six outputs.

use dataset_split::data::dataset::LabeledDataset;
use dataset_split::domain::split_config::CacheKey;
use dataset_split::infra::split_cache::{CacheLookup, SplitCache, SplitOrigin};
use dataset_split::{split_dataset, SplitConfig, SplitError, SplitUseCase};
use tempfile::TempDir;

fn recordings(n: usize) -> LabeledDataset<Vec<f32>, String> {
    (0..n)
        .map(|i| (vec![i as f32, 0.5], if i % 4 == 0 { "onset".to_string() } else { "silence".to_string() }))
        .collect()
}

fn config(root: &std::path::Path) -> SplitConfig {
    let json = format!(
        r#"{{
            "val_split": 0.1,
            "test_split": 0.2,
            "train_split": 0.7,
            "cache_root": {root:?},
            "dataset_name": "sentence_onset",
            "subject": "sub_1",
            "run_identifiers": ["trial000", "trial001"],
            "electrodes": ["T1cIe11"]
        }}"#,
        root = root.display().to_string()
    );
    SplitConfig::from_json_str(&json).unwrap()
}

#[test]
fn first_run_writes_cache_second_run_reads_it() {
    let tmp     = TempDir::new().unwrap();
    let cfg     = config(tmp.path());
    let dataset = recordings(100);

    let first = SplitUseCase::new(cfg.clone()).resolve(&dataset).unwrap();
    let entry = tmp.path().join("sentence_onset/sub_1/trial000_trial001/splits.json");
    assert_eq!(first.origin, SplitOrigin::Computed { stored_at: Some(entry.clone()) });
    assert!(entry.exists());

    let second = SplitUseCase::new(cfg).resolve(&dataset).unwrap();
    assert_eq!(second.origin, SplitOrigin::Cached(entry));
    assert_eq!(first.split, second.split);
}

#[test]
fn cached_entry_round_trips_exactly() {
    let tmp     = TempDir::new().unwrap();
    let cfg     = config(tmp.path());
    let written = SplitUseCase::new(cfg).resolve(&recordings(100)).unwrap().split;

    let key = CacheKey::new("sentence_onset", "sub_1", vec!["trial000".into(), "trial001".into()]);
    assert_eq!(SplitCache::new(tmp.path()).load(&key), CacheLookup::Hit(written));
}

#[test]
fn materialized_shapes_match_scenario() {
    let tmp = TempDir::new().unwrap();
    let (train_x, train_y, test_x, test_y, val_x, val_y) =
        split_dataset(&recordings(100), &config(tmp.path())).unwrap().into_tuple();

    assert_eq!((train_x.len(), train_y.len()), (70, 70));
    assert_eq!((val_x.len(),   val_y.len()),   (10, 10));
    assert_eq!((test_x.len(),  test_y.len()),  (20, 20));
}

#[test]
fn growing_the_dataset_invalidates_the_cache() {
    let tmp = TempDir::new().unwrap();
    let cfg = config(tmp.path());

    split_dataset(&recordings(100), &cfg).unwrap();
    let err = split_dataset(&recordings(120), &cfg).unwrap_err();
    assert!(matches!(err, SplitError::Inconsistent(_)));
}

#[test]
fn growing_the_dataset_invalidates_a_fewshot_cache() {
    let tmp = TempDir::new().unwrap();
    let mut cfg = config(tmp.path());
    cfg.train_fewshot = Some(8);

    let out = split_dataset(&recordings(100), &cfg).unwrap();
    assert_eq!(out.train_x.len(), 8);

    let key = CacheKey::new("sentence_onset", "sub_1", vec!["trial000".into(), "trial001".into()]);
    match SplitCache::new(tmp.path()).load(&key) {
        CacheLookup::Hit(stored) => assert_eq!(stored.total(), 100),
        other => panic!("expected a stored entry, got {other:?}"),
    }

    let err = split_dataset(&recordings(120), &cfg).unwrap_err();
    assert!(matches!(err, SplitError::Inconsistent(_)));
}

#[test]
fn test_only_split_without_cache() {
    let cfg = SplitConfig::from_json_str(r#"{"test_split": 0.2, "train_split": 0.8}"#).unwrap();
    let out = split_dataset(&recordings(50), &cfg).unwrap();

    assert!(out.val_x.is_empty());
    assert!(out.val_y.is_empty());
    assert_eq!(out.train_x.len(), 40);
    assert_eq!(out.test_x.len(),  10);
}
