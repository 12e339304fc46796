// ============================================================
// Layer 3 — Misclassification Domain Types
// ============================================================
// The records that flow through the error-analysis pipeline:
//
//   MisclassificationEntry — one sample the model got wrong,
//     built during the inference pass and never mutated after.
//   ErrorCategory — the heuristic bucket explaining the likely
//     linguistic cause of the mistake. Exactly one per entry.
//   DocumentArtifact — the PDF report generated for an entry.
//   MetaEntry — a MisclassificationEntry joined with its report
//     path; one record of the exported metadata index, which is
//     the sole contract between the pipeline and the viewer.
//
// Reference: Rust Book §5 (Structs), §6 (Enums)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::domain::prediction::Confidence;
use crate::domain::sample::Label;

/// Heuristic error bucket. Serialised as the category's
/// SCREAMING_SNAKE_CASE name (NEGATION_ERROR, ...), matching the
/// strings in the CSV artifact and the metadata index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    NegationError,
    ContrastError,
    SarcasmError,
    LongReviewError,
    LexicalPolarityTrap,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::NegationError => "NEGATION_ERROR",
            ErrorCategory::ContrastError => "CONTRAST_ERROR",
            ErrorCategory::SarcasmError => "SARCASM_ERROR",
            ErrorCategory::LongReviewError => "LONG_REVIEW_ERROR",
            ErrorCategory::LexicalPolarityTrap => "LEXICAL_POLARITY_TRAP",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One misclassified sample. Created only when the predicted label
/// differs from ground truth; `id` is 1-based and stable within a
/// run (order of encounter during the inference pass).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MisclassificationEntry {
    pub id: usize,
    pub text: String,
    pub true_label: Label,
    pub pred_label: Label,
    pub confidence: Confidence,
    pub error_type: ErrorCategory,
}

/// One generated PDF report, keyed by the entry id it documents.
#[derive(Debug, Clone)]
pub struct DocumentArtifact {
    pub index: usize,
    pub file_path: PathBuf,
}

/// One record of the exported metadata index: all entry fields
/// plus the report path. `document_path` may reference a file
/// that does not exist — entries outside the explained subset
/// are still indexed, and the viewer treats a missing file as
/// "no document", not as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaEntry {
    pub id: usize,
    pub text: String,
    pub true_label: Label,
    pub pred_label: Label,
    pub confidence: Confidence,
    pub error_type: ErrorCategory,
    pub document_path: String,
}

impl MetaEntry {
    pub fn from_entry(entry: &MisclassificationEntry, document_path: String) -> Self {
        Self {
            id: entry.id,
            text: entry.text.clone(),
            true_label: entry.true_label,
            pred_label: entry.pred_label,
            confidence: entry.confidence,
            error_type: entry.error_type,
            document_path,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serialises_as_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorCategory::NegationError).unwrap();
        assert_eq!(json, "\"NEGATION_ERROR\"");
        let json = serde_json::to_string(&ErrorCategory::LexicalPolarityTrap).unwrap();
        assert_eq!(json, "\"LEXICAL_POLARITY_TRAP\"");
    }

    #[test]
    fn test_category_display_matches_serde_name() {
        for cat in [
            ErrorCategory::NegationError,
            ErrorCategory::ContrastError,
            ErrorCategory::SarcasmError,
            ErrorCategory::LongReviewError,
            ErrorCategory::LexicalPolarityTrap,
        ] {
            let json = serde_json::to_string(&cat).unwrap();
            assert_eq!(json, format!("\"{cat}\""));
        }
    }

    #[test]
    fn test_meta_entry_preserves_all_fields() {
        let entry = MisclassificationEntry {
            id: 3,
            text: "not great".to_string(),
            true_label: Label::Positive,
            pred_label: Label::Negative,
            confidence: Confidence::new(0.1, 0.9),
            error_type: ErrorCategory::NegationError,
        };
        let meta = MetaEntry::from_entry(&entry, "reports/error_report_3.pdf".to_string());
        assert_eq!(meta.id, entry.id);
        assert_eq!(meta.text, entry.text);
        assert_eq!(meta.true_label, entry.true_label);
        assert_eq!(meta.pred_label, entry.pred_label);
        assert_eq!(meta.confidence, entry.confidence);
        assert_eq!(meta.error_type, entry.error_type);
        assert_eq!(meta.document_path, "reports/error_report_3.pdf");
    }
}
