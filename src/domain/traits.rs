// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The external collaborators of the pipeline sit behind these
// narrow traits. The analysis core only ever sees the trait,
// never the implementation, so:
//   - tests inject deterministic stubs returning fixed scores
//   - the Burn model stays confined to the ml layer
//   - a future ONNX-backed classifier would slot in unchanged
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;

use crate::domain::attribution::Attribution;
use crate::domain::prediction::Prediction;
use crate::domain::sample::Sample;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can load labelled review samples.
///
/// Implementations:
///   - ReviewCorpusLoader → pos/ and neg/ directories of text files
pub trait CorpusSource {
    /// Load all available samples from this source.
    fn load_all(&self) -> Result<Vec<Sample>>;
}

// ─── SentimentClassifier ──────────────────────────────────────────────────────
/// The black-box sentiment model: text in, label plus per-class
/// scores out. A call that fails propagates to the caller — the
/// pipeline defines no retry or skip policy.
///
/// Implementations:
///   - Inferencer → the Burn transformer loaded from a checkpoint
///   - test stubs → fixed scores for deterministic pipeline tests
pub trait SentimentClassifier {
    fn classify(&self, text: &str) -> Result<Prediction>;
}

// ─── AttributionExplainer ─────────────────────────────────────────────────────
/// The explainability collaborator: given the classifier and a
/// text, produce per-token attribution for the predicted class.
///
/// Implementations:
///   - OcclusionExplainer → masks one word at a time and measures
///     the probability drop
pub trait AttributionExplainer {
    fn explain(&self, classifier: &dyn SentimentClassifier, text: &str) -> Result<Attribution>;
}
