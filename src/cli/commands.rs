// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands:
//   split   — split a dataset file (using the cache if set up)
//   inspect — show what the cache holds for a key
//
// Every split option can come from a JSON config file, a flag,
// or both. Flags win.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand};
use dataset_split::domain::split_config::{CacheKey, SplitConfig};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a dataset into train/val/test, reusing a cached split if present
    Split(SplitArgs),

    /// Show the cached split for a dataset/subject/runs key
    Inspect(InspectArgs),
}

/// Identity of a cached split. Shared by both subcommands.
#[derive(Args, Debug, Default)]
pub struct KeyArgs {
    /// Root directory of saved splits
    #[arg(long)]
    pub cache_root: Option<PathBuf>,

    /// Dataset name (first path component under the cache root)
    #[arg(long)]
    pub dataset_name: Option<String>,

    /// Subject identifier
    #[arg(long)]
    pub subject: Option<String>,

    /// Run identifiers, comma separated; joined with '_' in the cache path
    #[arg(long, value_delimiter = ',')]
    pub runs: Vec<String>,
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Dataset JSON: {"samples": [{"features": [...], "label": ...}]}
    #[arg(long)]
    pub dataset: PathBuf,

    /// Optional JSON split config; unknown keys are ignored
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fraction held out for validation
    #[arg(long)]
    pub val_split: Option<f64>,

    /// Fraction held out for testing
    #[arg(long)]
    pub test_split: Option<f64>,

    /// Train fraction, only checked against the other two
    #[arg(long)]
    pub train_split: Option<f64>,

    /// Keep only the first N training indices
    #[arg(long)]
    pub train_fewshot: Option<usize>,

    #[command(flatten)]
    pub key: KeyArgs,

    /// Ignore any cached split and overwrite it
    #[arg(long)]
    pub reload: bool,

    /// Fail if a cached split does not match the requested ratios
    #[arg(long)]
    pub strict_ratios: bool,
}

impl SplitArgs {
    /// Lay the flags over `base`. Only flags that were given change it.
    pub fn apply_to(&self, mut base: SplitConfig) -> SplitConfig {
        if let Some(v) = self.val_split     { base.val_split     = v; }
        if let Some(v) = self.test_split    { base.test_split    = v; }
        if let Some(v) = self.train_split   { base.train_split   = Some(v); }
        if let Some(v) = self.train_fewshot { base.train_fewshot = Some(v); }

        if let Some(root) = &self.key.cache_root   { base.cache_root   = Some(root.clone()); }
        if let Some(name) = &self.key.dataset_name { base.dataset_name = Some(name.clone()); }
        if let Some(subj) = &self.key.subject      { base.subject      = Some(subj.clone()); }
        if !self.key.runs.is_empty() {
            base.run_identifiers = self.key.runs.clone();
        }

        base.reload_split  |= self.reload;
        base.strict_ratios |= self.strict_ratios;
        base
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub key: KeyArgs,
}

impl InspectArgs {
    /// Root and key, if both cache root and identity were given.
    pub fn cache_location(&self) -> Option<(PathBuf, CacheKey)> {
        let root = self.key.cache_root.clone()?;
        let key  = CacheKey::new(
            self.key.dataset_name.clone()?,
            self.key.subject.clone()?,
            self.key.runs.clone(),
        );
        Some((root, key))
    }
}
