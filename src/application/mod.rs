// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Coordinates the other layers to turn a dataset and a
// SplitConfig into train/val/test data.
//
// Rules for this layer:
//   - No shuffling or index arithmetic here (Layer 4)
//   - No file access here (Layer 6)
//   - No printing here (Layer 1)
//   - Only workflow coordination and the consistency checks
//     that need both the dataset and the resolved split

// The resolve → validate → materialize workflow
pub mod split_use_case;
