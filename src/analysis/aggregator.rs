// ============================================================
// Layer 4b — Inference Run Aggregator
// ============================================================
// Runs the classifier over every sample, compares the verdict
// against ground truth, and records a MisclassificationEntry
// for each mismatch. Pure orchestration: no I/O, no retries —
// a failing classifier call aborts the run via `?` and the
// caller decides what to do.
//
// Each text is truncated to max_text_len characters before the
// classifier sees it, bounding the cost of the external call.
// Categorisation runs on the truncated text too: the category
// should explain what the model actually saw.

use anyhow::Result;

use crate::analysis::taxonomy::ErrorTaxonomy;
use crate::domain::misclassification::MisclassificationEntry;
use crate::domain::sample::Sample;
use crate::domain::traits::SentimentClassifier;

/// Character cap applied to every text before classification.
pub const MAX_TEXT_LEN: usize = 512;

/// Aggregate numbers for one inference pass.
#[derive(Debug, Clone, Copy)]
pub struct RunMetrics {
    pub total: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub misclassified: usize,
}

/// One inference pass over a sample set.
pub struct InferenceRun {
    taxonomy: ErrorTaxonomy,
    max_text_len: usize,
}

impl InferenceRun {
    pub fn new(max_text_len: usize) -> Self {
        Self {
            taxonomy: ErrorTaxonomy::new(),
            max_text_len,
        }
    }

    /// Classify every sample and collect the mismatches, in order
    /// of encounter, with 1-based auto-incrementing ids.
    pub fn run(
        &self,
        samples: &[Sample],
        classifier: &dyn SentimentClassifier,
    ) -> Result<(RunMetrics, Vec<MisclassificationEntry>)> {
        let mut correct = 0usize;
        let mut entries: Vec<MisclassificationEntry> = Vec::new();

        for sample in samples {
            let text = truncate_chars(&sample.text, self.max_text_len);
            let prediction = classifier.classify(&text)?;

            if prediction.label == sample.label {
                correct += 1;
            } else {
                let error_type = self.taxonomy.classify(&text);
                entries.push(MisclassificationEntry {
                    id: entries.len() + 1,
                    text,
                    true_label: sample.label,
                    pred_label: prediction.label,
                    confidence: prediction.confidence,
                    error_type,
                });
            }
        }

        let total = samples.len();
        let metrics = RunMetrics {
            total,
            correct,
            accuracy: if total > 0 {
                correct as f64 / total as f64
            } else {
                0.0
            },
            misclassified: entries.len(),
        };

        tracing::info!(
            "Inference pass done: {}/{} correct ({:.2}%), {} misclassified",
            metrics.correct,
            metrics.total,
            metrics.accuracy * 100.0,
            metrics.misclassified,
        );

        Ok((metrics, entries))
    }
}

/// Truncate to at most `max` characters, respecting char
/// boundaries (a byte slice could split a multi-byte char).
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::misclassification::ErrorCategory;
    use crate::domain::prediction::Prediction;
    use crate::domain::sample::Label;
    use anyhow::bail;

    /// Deterministic stub: always predicts the same label.
    struct FixedClassifier {
        label: Label,
    }

    impl SentimentClassifier for FixedClassifier {
        fn classify(&self, _text: &str) -> Result<Prediction> {
            Ok(match self.label {
                Label::Positive => Prediction::from_scores(0.9, 0.1),
                Label::Negative => Prediction::from_scores(0.1, 0.9),
            })
        }
    }

    /// Stub that fails on every call.
    struct BrokenClassifier;

    impl SentimentClassifier for BrokenClassifier {
        fn classify(&self, _text: &str) -> Result<Prediction> {
            bail!("model exploded")
        }
    }

    #[test]
    fn test_accuracy_and_entry_ids() {
        let samples = vec![
            Sample::new("loved it", Label::Positive),
            Sample::new("not great", Label::Negative),
            Sample::new("good but boring", Label::Negative),
            Sample::new("wonderful", Label::Positive),
        ];
        // Always predicts positive → the two negative samples mismatch.
        let classifier = FixedClassifier {
            label: Label::Positive,
        };
        let run = InferenceRun::new(MAX_TEXT_LEN);
        let (metrics, entries) = run.run(&samples, &classifier).unwrap();

        assert_eq!(metrics.total, 4);
        assert_eq!(metrics.correct, 2);
        assert_eq!(metrics.misclassified, 2);
        assert!((metrics.accuracy - 0.5).abs() < 1e-9);

        // Ids are 1-based, in order of encounter.
        assert_eq!(entries[0].id, 1);
        assert_eq!(entries[0].text, "not great");
        assert_eq!(entries[0].error_type, ErrorCategory::NegationError);
        assert_eq!(entries[1].id, 2);
        assert_eq!(entries[1].error_type, ErrorCategory::ContrastError);
    }

    #[test]
    fn test_no_entries_when_all_correct() {
        let samples = vec![
            Sample::new("loved it", Label::Positive),
            Sample::new("amazing", Label::Positive),
        ];
        let classifier = FixedClassifier {
            label: Label::Positive,
        };
        let run = InferenceRun::new(MAX_TEXT_LEN);
        let (metrics, entries) = run.run(&samples, &classifier).unwrap();
        assert_eq!(metrics.accuracy, 1.0);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_classifier_failure_propagates() {
        let samples = vec![Sample::new("anything", Label::Positive)];
        let run = InferenceRun::new(MAX_TEXT_LEN);
        assert!(run.run(&samples, &BrokenClassifier).is_err());
    }

    #[test]
    fn test_empty_sample_set() {
        let run = InferenceRun::new(MAX_TEXT_LEN);
        let classifier = FixedClassifier {
            label: Label::Positive,
        };
        let (metrics, entries) = run.run(&[], &classifier).unwrap();
        assert_eq!(metrics.total, 0);
        assert_eq!(metrics.accuracy, 0.0);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_text_truncated_before_classification() {
        let long_text = "x".repeat(2000);
        let samples = vec![Sample::new(long_text, Label::Negative)];
        let classifier = FixedClassifier {
            label: Label::Positive,
        };
        let run = InferenceRun::new(MAX_TEXT_LEN);
        let (_, entries) = run.run(&samples, &classifier).unwrap();
        assert_eq!(entries[0].text.chars().count(), MAX_TEXT_LEN);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "héllo wörld";
        assert_eq!(truncate_chars(text, 3), "hél");
        assert_eq!(truncate_chars(text, 100), text);
    }
}
