// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns used by several layers:
//
//   checkpoint.rs      — Saving and loading model weights via
//                        Burn's CompactRecorder, plus the model
//                        config JSON the inferencer needs to
//                        rebuild the architecture.
//
//   tokenizer_store.rs — Tokenizer persistence. Builds a
//                        word-level vocabulary from the review
//                        corpus if none exists, or loads the
//                        previously saved one, so training and
//                        inference always share a vocabulary.
//
//   metrics.rs         — Training metrics logging: epoch-level
//                        loss/accuracy rows appended to a CSV.
//
//   meta_store.rs      — The misclassification metadata index:
//                        the JSON file that is the single
//                        contract between the offline analysis
//                        pipeline and the interactive viewer.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Tokenizer building, saving, and loading
pub mod tokenizer_store;

/// Training metrics CSV logger
pub mod metrics;

/// Misclassification metadata index export/load
pub mod meta_store;
