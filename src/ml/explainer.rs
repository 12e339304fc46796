// ============================================================
// Layer 5 — Occlusion Explainer
// ============================================================
// Per-token attribution by occlusion: classify the full text
// once, then re-classify it with one word at a time replaced by
// the mask token. The attribution of a word is how much the
// probability of the predicted class drops when that word is
// hidden:
//
//   score(w) = P(pred | text) − P(pred | text with w masked)
//
// Positive score → the word supported the prediction.
// Deterministic for a deterministic classifier, and it needs no
// access to model internals — only the SentimentClassifier
// trait — so it works identically against the Burn model and
// against test stubs.
//
// Cost: one classifier call per (bounded) token. The token cap
// keeps the fan-out predictable for long reviews.

use anyhow::Result;

use crate::domain::attribution::{Attribution, TokenAttribution};
use crate::domain::traits::{AttributionExplainer, SentimentClassifier};

/// At most this many leading words of a text are attributed.
pub const MAX_ATTRIBUTION_TOKENS: usize = 64;

// ─── TextMasker ───────────────────────────────────────────────────────────────
/// The masking strategy: rebuild the text with one word replaced
/// by the mask token.
pub struct TextMasker {
    mask_token: String,
}

impl TextMasker {
    pub fn new(mask_token: impl Into<String>) -> Self {
        Self {
            mask_token: mask_token.into(),
        }
    }

    /// The text with the word at `index` replaced.
    pub fn mask(&self, words: &[&str], index: usize) -> String {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| {
                if i == index {
                    self.mask_token.as_str()
                } else {
                    w
                }
            })
            .collect::<Vec<&str>>()
            .join(" ")
    }
}

// ─── OcclusionExplainer ───────────────────────────────────────────────────────
pub struct OcclusionExplainer {
    masker: TextMasker,
    max_tokens: usize,
}

impl OcclusionExplainer {
    /// Standard configuration: the tokenizer's [MASK] token and
    /// the default token cap.
    pub fn new() -> Self {
        Self::with_masker(TextMasker::new("[MASK]"), MAX_ATTRIBUTION_TOKENS)
    }

    pub fn with_masker(masker: TextMasker, max_tokens: usize) -> Self {
        Self { masker, max_tokens }
    }
}

impl Default for OcclusionExplainer {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributionExplainer for OcclusionExplainer {
    fn explain(&self, classifier: &dyn SentimentClassifier, text: &str) -> Result<Attribution> {
        let base = classifier.classify(text)?;
        let predicted = base.label;
        let base_score = base.confidence.for_label(predicted);

        let words: Vec<&str> = text.split_whitespace().collect();
        let mut tokens = Vec::with_capacity(words.len().min(self.max_tokens));

        for (i, word) in words.iter().enumerate().take(self.max_tokens) {
            let masked = self.masker.mask(&words, i);
            let masked_prediction = classifier.classify(&masked)?;
            tokens.push(TokenAttribution {
                token: word.to_string(),
                score: base_score - masked_prediction.confidence.for_label(predicted),
            });
        }

        Ok(Attribution { predicted, tokens })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::Prediction;

    /// Stub that hates the word "boring": its presence drives the
    /// negative score up, anything else is mildly positive.
    struct KeywordClassifier;

    impl SentimentClassifier for KeywordClassifier {
        fn classify(&self, text: &str) -> Result<Prediction> {
            if text.contains("boring") {
                Ok(Prediction::from_scores(0.2, 0.8))
            } else {
                Ok(Prediction::from_scores(0.7, 0.3))
            }
        }
    }

    #[test]
    fn test_masker_replaces_one_word() {
        let masker = TextMasker::new("[MASK]");
        let words = vec!["good", "but", "boring"];
        assert_eq!(masker.mask(&words, 1), "good [MASK] boring");
        assert_eq!(masker.mask(&words, 2), "good but [MASK]");
    }

    #[test]
    fn test_one_score_per_token() {
        let explainer = OcclusionExplainer::new();
        let attribution = explainer
            .explain(&KeywordClassifier, "good but boring")
            .unwrap();
        assert_eq!(attribution.tokens.len(), 3);
        assert_eq!(attribution.tokens[0].token, "good");
        assert_eq!(attribution.tokens[2].token, "boring");
    }

    #[test]
    fn test_influential_word_gets_the_largest_score() {
        // Prediction on the full text is NEGATIVE (because of
        // "boring"); masking "boring" flips the score, so it must
        // carry the largest attribution.
        let explainer = OcclusionExplainer::new();
        let attribution = explainer
            .explain(&KeywordClassifier, "good but boring")
            .unwrap();
        let top = attribution.top_tokens(1);
        assert_eq!(top[0].token, "boring");
        assert!(top[0].score > 0.0);
    }

    #[test]
    fn test_token_cap_bounds_the_fan_out() {
        let explainer = OcclusionExplainer::with_masker(TextMasker::new("[MASK]"), 4);
        let text = "one two three four five six seven";
        let attribution = explainer.explain(&KeywordClassifier, text).unwrap();
        assert_eq!(attribution.tokens.len(), 4);
    }

    #[test]
    fn test_deterministic_given_deterministic_classifier() {
        let explainer = OcclusionExplainer::new();
        let a = explainer
            .explain(&KeywordClassifier, "good but boring")
            .unwrap();
        let b = explainer
            .explain(&KeywordClassifier, "good but boring")
            .unwrap();
        assert_eq!(a.tokens, b.tokens);
    }
}
