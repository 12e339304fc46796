// ============================================================
// Layer 3 — Sample Domain Types
// ============================================================
// Represents one labelled review from the corpus.
//
// The corpus speaks integers: 0 = negative, 1 = positive
// (the label is implied by the pos/ or neg/ subdirectory).
// The Label enum keeps that wire format — it serialises as the
// raw 0/1 integer — while giving the rest of the code a closed,
// type-checked set of classes and a display name for reports.
//
// Reference: Rust Book §6 (Enums)
//            Rust Book §10 (Derive Macros)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentiment class of a review. Serialised as 0 (negative) or
/// 1 (positive) so the metadata index matches the corpus labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    /// The class name used by the classifier's confidence mapping
    /// and by human-facing output (PDF reports, viewer).
    pub fn name(self) -> &'static str {
        match self {
            Label::Negative => "NEGATIVE",
            Label::Positive => "POSITIVE",
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> u8 {
        match label {
            Label::Negative => 0,
            Label::Positive => 1,
        }
    }
}

impl TryFrom<u8> for Label {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::Negative),
            1 => Ok(Label::Positive),
            other => Err(format!("invalid label '{other}' — expected 0 or 1")),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw labelled review loaded from disk.
/// By the time a Sample is created, the text has already been
/// read from its plain-text file and trimmed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// The full review text
    pub text: String,

    /// Ground-truth sentiment from the corpus layout
    pub label: Label,
}

impl Sample {
    /// Create a new Sample. Uses impl Into<String> so callers can
    /// pass &str or String — idiomatic for flexible string arguments.
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}
