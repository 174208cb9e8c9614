// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments, reads input files, prints results.
// All splitting logic is delegated to the library.
//
//   dataset-split split   --dataset data.json --test-split 0.2 ...
//   dataset-split inspect --cache-root splits --dataset-name ...

pub mod commands;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, InspectArgs, SplitArgs};
use dataset_split::{
    data::{dataset::LabeledDataset, materializer::materialize},
    domain::split_config::SplitConfig,
    infra::split_cache::{CacheLookup, SplitCache, SplitOrigin},
    SplitUseCase,
};

/// Labels in dataset files can be any JSON value (strings, ints, ...).
type FileDataset = LabeledDataset<Vec<f32>, serde_json::Value>;

#[derive(Parser, Debug)]
#[command(
    name = "dataset-split",
    version,
    about = "Deterministic, cached train/val/test splits for labelled datasets."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Split(args)   => run_split(args),
            Commands::Inspect(args) => run_inspect(args),
        }
    }
}

fn run_split(args: SplitArgs) -> Result<()> {
    let base = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Cannot read config '{}'", path.display()))?;
            SplitConfig::from_json_str(&json)
                .with_context(|| format!("Invalid split config '{}'", path.display()))?
        }
        None => SplitConfig::default(),
    };
    let config = args.apply_to(base);

    let json = fs::read_to_string(&args.dataset)
        .with_context(|| format!("Cannot read dataset '{}'", args.dataset.display()))?;
    let dataset: FileDataset = serde_json::from_str(&json)
        .with_context(|| format!("Invalid dataset file '{}'", args.dataset.display()))?;
    tracing::info!("Loaded {} records from '{}'", dataset.sample_count(), args.dataset.display());

    let use_case = SplitUseCase::new(config);
    let resolved = use_case.resolve(&dataset)?;

    match &resolved.origin {
        SplitOrigin::Cached(path) => println!("Loaded split from {}", path.display()),
        SplitOrigin::Computed { stored_at: Some(path) } => {
            println!("Computed split, saved to {}", path.display())
        }
        SplitOrigin::Computed { stored_at: None } => println!("Computed split (not cached)"),
    }

    let out = materialize(&dataset, &resolved.split)?;
    println!(
        "train: {} rows, val: {} rows, test: {} rows",
        out.train_x.len(),
        out.val_x.len(),
        out.test_x.len()
    );
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let (root, key) = args
        .cache_location()
        .context("inspect needs --cache-root, --dataset-name and --subject")?;

    let cache = SplitCache::new(root);
    println!("Entry: {}", cache.entry_path(&key).display());

    match cache.load(&key) {
        CacheLookup::Hit(split) => println!("Hit: {}", split.summary()),
        CacheLookup::Miss(reason) => println!("Miss: {reason}"),
    }
    Ok(())
}
