// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything that touches indices or records:
//
//   LabeledDataset   → in-memory records (burn Dataset)
//       │
//       ▼
//   splitter         → indices 0..n → train / val / test
//       │
//       ▼
//   materializer     → indices → feature rows + labels
//
// The splitter never sees records, only their count, which
// keeps it a pure function that is trivial to test.

/// In-memory labelled records, usable as a burn Dataset
pub mod dataset;

/// Deterministic train/val/test index split
pub mod splitter;

/// Gathers features and labels for each partition
pub mod materializer;
