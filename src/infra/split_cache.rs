// ============================================================
// Layer 6 — Split Cache
// ============================================================
// Persists computed splits so every run over the same data
// sees the same train/val/test indices.
//
// File layout:
//   {cache_root}/
//     {dataset_name}/
//       {subject}/
//         {run_a}_{run_b}/
//           splits.json     ← {"train": [...], "val": [...], "test": [...]}
//
// Contract:
//   load  → CacheLookup::Hit(split) or CacheLookup::Miss(reason)
//           A missing, unreadable or corrupt file is a MISS, never
//           an error. The caller simply recomputes.
//   store → Result. Failing to create the directory or write the
//           file is a hard error.
//
// resolve() glues the two around the splitter:
//
//   cache_root set? ──no──► compute ──────────────────────► split
//        │ yes
//        ▼
//   load ──Hit──► split (returned verbatim, not re-validated)
//        │ Miss
//        ▼
//   compute ──► store ──► split
//
// Writes are plain overwrites without locking. Two processes
// racing on an empty key both compute the same split (the
// splitter is deterministic), so whichever write lands last
// is still correct.
//
// Entries always hold the UNCAPPED split: train_fewshot is applied
// by the caller after the consistency check, so an entry can be
// compared against the dataset size exactly.
//
// The key deliberately ignores the ratios and train_fewshot:
// asking for different ratios against an existing entry returns
// the stored split. The use case layer compares sizes and warns.

use std::{
    fmt, fs,
    io::ErrorKind,
    path::PathBuf,
};

use crate::data::splitter;
use crate::domain::{
    error::{Result, SplitError},
    split_config::{CacheKey, SplitConfig},
    split_result::SplitResult,
};

// ─── Lookup Types ─────────────────────────────────────────────────────────────
/// Why a lookup did not produce a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissReason {
    /// No entry file at the key's path
    Absent,
    /// The entry exists but could not be read
    Unreadable(String),
    /// The entry was read but is not a valid split
    Corrupt(String),
    /// The caller asked to ignore the stored entry
    ReloadRequested,
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent          => write!(f, "no cached split"),
            Self::Unreadable(e)   => write!(f, "cached split unreadable: {e}"),
            Self::Corrupt(e)      => write!(f, "cached split corrupt: {e}"),
            Self::ReloadRequested => write!(f, "reload requested"),
        }
    }
}

/// Outcome of reading a cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(SplitResult),
    Miss(MissReason),
}

/// Where a resolved split came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOrigin {
    /// Read from this entry file
    Cached(PathBuf),
    /// Freshly computed; `stored_at` is the entry written, if caching is on
    Computed { stored_at: Option<PathBuf> },
}

// ─── SplitCache ───────────────────────────────────────────────────────────────
/// File-backed store of splits under one root directory.
pub struct SplitCache {
    root: PathBuf,
}

impl SplitCache {
    /// Point the cache at `root`. Nothing is created until the first store.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the entry file for `key`.
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        key.entry_path(&self.root)
    }

    /// Read the split stored under `key`.
    ///
    /// Every failure is reported as a miss with its reason and
    /// logged at warn level (absence is only logged at debug).
    pub fn load(&self, key: &CacheKey) -> CacheLookup {
        let path = self.entry_path(key);

        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No cached split at '{}'", path.display());
                return CacheLookup::Miss(MissReason::Absent);
            }
            Err(e) => {
                tracing::warn!("Cannot read cached split '{}': {}", path.display(), e);
                return CacheLookup::Miss(MissReason::Unreadable(e.to_string()));
            }
        };

        match serde_json::from_str::<SplitResult>(&json) {
            Ok(split) => {
                tracing::info!("Using saved train/val/test split at '{}'", path.display());
                CacheLookup::Hit(split)
            }
            Err(e) => {
                tracing::warn!("Ignoring corrupt cached split '{}': {}", path.display(), e);
                CacheLookup::Miss(MissReason::Corrupt(e.to_string()))
            }
        }
    }

    /// Write `split` under `key`, creating directories as needed.
    /// Overwrites any existing entry. Returns the entry path.
    pub fn store(&self, key: &CacheKey, split: &SplitResult) -> Result<PathBuf> {
        let dir = key.directory(&self.root);

        // create_dir_all is a no-op when the directory already exists
        fs::create_dir_all(&dir).map_err(|e| SplitError::cache_io(&dir, e))?;

        let path = self.entry_path(key);
        let json = serde_json::to_string(split)?;
        fs::write(&path, json).map_err(|e| SplitError::cache_io(&path, e))?;

        tracing::info!("Saved train/val/test split to '{}'", path.display());
        Ok(path)
    }
}

// ─── Resolve ──────────────────────────────────────────────────────────────────
/// Load the split for `config` from the cache, or compute and store it.
///
/// The returned split ignores `train_fewshot` and is NOT checked
/// against `n`; callers run `SplitResult::ensure_consistent` and then
/// `SplitResult::apply_fewshot` before using it.
pub fn resolve<L>(n: usize, labels: &[L], config: &SplitConfig) -> Result<SplitResult> {
    resolve_with_origin(n, labels, config).map(|(split, _)| split)
}

/// Same as [`resolve`], also reporting whether the split was cached.
pub fn resolve_with_origin<L>(
    n:      usize,
    labels: &[L],
    config: &SplitConfig,
) -> Result<(SplitResult, SplitOrigin)> {
    let cached = match (&config.cache_root, config.cache_key()?) {
        (Some(root), Some(key)) => Some((SplitCache::new(root), key)),
        _ => None,
    };

    let Some((cache, key)) = cached else {
        tracing::info!("Creating train/val/test split (no cache configured)");
        let split = splitter::compute_uncapped(n, labels, config)?;
        return Ok((split, SplitOrigin::Computed { stored_at: None }));
    };

    let lookup = if config.reload_split {
        CacheLookup::Miss(MissReason::ReloadRequested)
    } else {
        cache.load(&key)
    };

    match lookup {
        CacheLookup::Hit(split) => {
            let path = cache.entry_path(&key);
            Ok((split, SplitOrigin::Cached(path)))
        }
        CacheLookup::Miss(reason) => {
            tracing::info!("Creating train/val/test split ({})", reason);
            let split = splitter::compute_uncapped(n, labels, config)?;
            let path  = cache.store(&key, &split)?;
            Ok((split, SplitOrigin::Computed { stored_at: Some(path) }))
        }
    }
}
