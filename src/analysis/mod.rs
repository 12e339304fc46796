// ============================================================
// Layer 4b — Analysis Core
// ============================================================
// The error-categorisation and reporting pipeline:
//
//   samples + classifier
//       │
//       ▼
//   InferenceRun      → runs inference, isolates mismatches,
//       │                assigns each an ErrorCategory
//       ▼
//   Vec<MisclassificationEntry>
//       │
//       ▼
//   ErrorDistribution → category frequencies, CSV + bar chart
//
// Everything here is synchronous, single-pass and free of
// framework types; the classifier arrives as a trait object.

/// Ordered heuristic rules mapping text to one ErrorCategory
pub mod taxonomy;

/// The inference pass: accuracy metrics + misclassification entries
pub mod aggregator;

/// Category frequency counting and artifact generation
pub mod distribution;
