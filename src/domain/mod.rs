// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// This is the heart of the application — pure Rust structs
// and traits that define the core concepts of the system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - NO ML-specific code
//   - Only plain Rust structs, enums, and traits
//
// Why keep this layer pure?
//   - Easy to unit test (no model weights needed)
//   - Easy to understand (no framework noise)
//   - Easy to swap implementations (just implement the trait)
//
// Think of this layer as the "dictionary" of the system —
// it defines what things ARE, not how they work.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A labelled review loaded from the corpus
pub mod sample;

// A classifier verdict with per-class confidence
pub mod prediction;

// Error categories, misclassification records, index records
pub mod misclassification;

// Per-token attribution scores from the explainer
pub mod attribution;

// Core abstractions (traits) that other layers implement
pub mod traits;
