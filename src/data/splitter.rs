// ============================================================
// Layer 4 — Train/Validation/Test Splitter
// ============================================================
// Deterministically partitions the indices 0..n into three
// disjoint lists: train, val and test.
//
// Two shuffle-and-cut steps, each with a FRESH RNG seeded
// with the same constant:
//
//   0..n ──shuffle──► [ held out | train ]
//                         │
//                         ▼  (only if val_split > 0)
//              held out ──shuffle──► [ test | val ]
//
// Step 1 holds out ceil((val + test) * n) indices.
// Step 2 sends ceil(test / (val + test) * held_out) of them
// to test, the rest to val.
//
// If only test_split is set, the whole held-out group is the
// test set and val stays empty. A val-only split has no
// meaning here and is rejected.
//
// train_fewshot truncates train AFTER the shuffle, so a capped
// train set is always a prefix of the uncapped one.
//
// Uses Fisher-Yates via rand::seq::SliceRandom driven by
// ChaCha8, whose output stream is stable across platforms and
// rand releases. Same inputs → byte-identical index lists.
//
// Reference: Rust Book §8 (Vectors)
//            rand / rand_chacha documentation

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::{
    error::{Result, SplitError},
    split_config::{SplitConfig, FRACTION_TOLERANCE},
    split_result::{SplitResult, SplitSummary},
};

/// Relative slack for `fraction * total`, whose rounding error grows with `total`.
const RELATIVE_TOLERANCE: f64 = 1e-12;

/// Seed used for every shuffle. Changing it invalidates every cached split.
pub const SPLIT_SEED: u64 = 42;

/// Compute the train/val/test split for a dataset of `n` records.
///
/// `labels` must hold one label per record. They are only checked
/// for length: the split is not stratified.
///
/// # Errors
/// * `EmptyDataset` if `n == 0`
/// * `LabelLengthMismatch` if `labels.len() != n`
/// * `Config` if the fractions are invalid or a requested partition
///   would come out empty
/// * `UnsupportedSplit` if `test_split == 0`
///
/// # Example
/// ```
/// use dataset_split::data::splitter::compute;
/// use dataset_split::domain::split_config::SplitConfig;
///
/// let labels = vec![0u8; 100];
/// let split  = compute(100, &labels, &SplitConfig::with_fractions(0.1, 0.2)).unwrap();
/// assert_eq!(split.train.len(), 70);
/// assert_eq!(split.val.len(),   10);
/// assert_eq!(split.test.len(),  20);
/// ```
pub fn compute<L>(n: usize, labels: &[L], config: &SplitConfig) -> Result<SplitResult> {
    let mut split = compute_uncapped(n, labels, config)?;
    split.apply_fewshot(config.train_fewshot);
    Ok(split)
}

/// Same as [`compute`] but ignores `train_fewshot`.
///
/// This is the form that gets cached: it always covers all `n`
/// records, so a cached entry can be checked against the dataset
/// exactly, whatever cap the caller applies afterwards.
pub fn compute_uncapped<L>(n: usize, labels: &[L], config: &SplitConfig) -> Result<SplitResult> {
    check_inputs(n, labels.len(), config)?;

    let all_idxs: Vec<usize> = (0..n).collect();
    let (train, held_out) = shuffle_split(all_idxs, config.held_out_fraction());

    if train.is_empty() {
        return Err(SplitError::config(format!(
            "holding out {} of {n} records leaves no training data",
            held_out.len()
        )));
    }

    let (val, test) = if config.val_split > 0.0 {
        let (val, test) = shuffle_split(held_out, test_share(config));
        if val.is_empty() {
            return Err(SplitError::config(format!(
                "val_split={} leaves no validation data out of {} held-out records",
                config.val_split,
                test.len()
            )));
        }
        (val, test)
    } else {
        (Vec::new(), held_out)
    };

    let split = SplitResult::new(train, val, test);
    tracing::debug!("Computed split over {} records: {}", n, split.summary());
    Ok(split)
}

/// Partition sizes `compute` would produce for `n` records, without shuffling.
///
/// Used to compare a cached split against the current ratios.
pub fn planned_sizes(n: usize, config: &SplitConfig) -> SplitSummary {
    let held_out   = held_out_count(config.held_out_fraction(), n);
    let train_full = n - held_out;
    let train      = config
        .train_fewshot
        .map_or(train_full, |cap| cap.min(train_full));

    let (val, test) = if config.val_split > 0.0 && config.test_split > 0.0 {
        let test = held_out_count(test_share(config), held_out);
        (held_out - test, test)
    } else {
        (0, held_out)
    };

    SplitSummary { train, val, test }
}

fn check_inputs(n: usize, label_count: usize, config: &SplitConfig) -> Result<()> {
    if n == 0 {
        return Err(SplitError::EmptyDataset);
    }
    if label_count != n {
        return Err(SplitError::LabelLengthMismatch { labels: label_count, records: n });
    }

    config.validate()?;

    if config.test_split <= 0.0 {
        return Err(SplitError::UnsupportedSplit {
            val_split:  config.val_split,
            test_split: config.test_split,
        });
    }

    Ok(())
}

/// Fraction of the held-out group that goes to test.
fn test_share(config: &SplitConfig) -> f64 {
    config.test_split / config.held_out_fraction()
}

/// Number of items held out when `fraction` of `total` is requested.
/// Rounds up, ignoring floating-point noise below the tolerance.
fn held_out_count(fraction: f64, total: usize) -> usize {
    let raw   = fraction * total as f64;
    let slack = FRACTION_TOLERANCE.max(raw.abs() * RELATIVE_TOLERANCE);
    ((raw - slack).ceil().max(0.0) as usize).min(total)
}

/// Shuffle with a freshly seeded RNG, then cut into (kept, held_out).
/// Both halves keep their shuffled order.
fn shuffle_split(mut items: Vec<usize>, held_out_fraction: f64) -> (Vec<usize>, Vec<usize>) {
    let mut rng = ChaCha8Rng::seed_from_u64(SPLIT_SEED);
    items.shuffle(&mut rng);

    let n_held = held_out_count(held_out_fraction, items.len());

    // split_off(n) leaves [0..n) in `items` and returns [n..len)
    let kept = items.split_off(n_held);
    (kept, items)
}
