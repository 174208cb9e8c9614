// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types that describe a split:
//
//   SplitConfig  — ratios, few-shot cap, cache identity
//   SplitResult  — the train/val/test index lists
//   SplitError   — every way a split can fail
//   LabeledSource — what the core needs from a dataset
//
// Rules for this layer:
//   - NO file I/O
//   - NO randomness
//   - NO burn types
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

/// Typed failures of the splitting core
pub mod error;

/// Split ratios and cache identity
pub mod split_config;

/// Train/val/test index lists and their consistency check
pub mod split_result;

/// Dataset abstraction consumed by the core
pub mod traits;
