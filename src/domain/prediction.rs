// ============================================================
// Layer 3 — Prediction Domain Types
// ============================================================
// The verdict of the sentiment classifier for one input:
// a winning label plus the per-class probability scores.
//
// Confidence is a closed two-class mapping. It serialises as
//   {"POSITIVE": 0.98, "NEGATIVE": 0.02}
// which is exactly the shape the metadata index and the viewer
// expect, while the struct keeps the class set explicit instead
// of hiding it in a free-form map.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::sample::Label;

/// Per-class probability scores for one classified text.
/// The two fields sum to ~1.0 (softmax output).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Confidence {
    #[serde(rename = "POSITIVE")]
    pub positive: f64,

    #[serde(rename = "NEGATIVE")]
    pub negative: f64,
}

impl Confidence {
    pub fn new(positive: f64, negative: f64) -> Self {
        Self { positive, negative }
    }

    /// Probability assigned to the given class.
    pub fn for_label(&self, label: Label) -> f64 {
        match label {
            Label::Positive => self.positive,
            Label::Negative => self.negative,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{POSITIVE: {:.4}, NEGATIVE: {:.4}}}",
            self.positive, self.negative
        )
    }
}

/// One classifier verdict: the winning label and its score mapping.
/// Derived from a Sample via the classifier collaborator;
/// not persisted on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: Label,
    pub confidence: Confidence,
}

impl Prediction {
    /// Decide the label from raw class scores.
    /// Positive wins on a strictly greater score; ties go negative —
    /// the same comparison the score consumers were written against.
    pub fn from_scores(positive: f64, negative: f64) -> Self {
        let label = if positive > negative {
            Label::Positive
        } else {
            Label::Negative
        };
        Self {
            label,
            confidence: Confidence::new(positive, negative),
        }
    }
}
