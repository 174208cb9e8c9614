// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The splitting core never owns the dataset. It only needs
// three things from it:
//
//   length()          — how many records there are
//   label_sequence()  — one label per record, in record order
//   feature_gather()  — pull feature rows out by index
//
// Anything that can answer those three questions can be
// split: an in-memory Vec, a memory-mapped array, a burn
// dataset backed by SQLite, ...
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::error::Result;

// ─── LabeledSource ────────────────────────────────────────────────────────────
/// A dataset of labelled records that supports gathering rows by index.
///
/// Implementations:
///   - LabeledDataset → in-memory samples, also a burn Dataset
pub trait LabeledSource {
    /// Categorical label attached to each record.
    type Label: Clone;

    /// Container returned by a gather (e.g. `Vec<Vec<f32>>`).
    /// Must be able to represent zero rows.
    type Features;

    /// Number of records.
    fn length(&self) -> usize;

    /// All labels, `length()` long, in record order.
    fn label_sequence(&self) -> Vec<Self::Label>;

    /// Feature rows at `indices`, in the order given.
    ///
    /// Fails with `SplitError::IndexOutOfRange` for an index past
    /// the end of the dataset.
    fn feature_gather(&self, indices: &[usize]) -> Result<Self::Features>;
}
