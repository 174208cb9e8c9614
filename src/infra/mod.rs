// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
//   split_cache.rs — On-disk split persistence
//                    Stores each computed split as JSON under
//                    a path built from dataset name, subject
//                    and run identifiers, and reads it back on
//                    later runs so every experiment over the
//                    same data sees the same indices.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

/// Split cache: load-or-compute-and-store
pub mod split_cache;
