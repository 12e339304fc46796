// ============================================================
// Layer 4b — Error Taxonomy
// ============================================================
// Assigns every misclassified text exactly one ErrorCategory
// via an ordered rule chain, first match wins:
//
//   1. negation word present   → NEGATION_ERROR
//   2. contrast word present   → CONTRAST_ERROR
//   3. sarcasm pattern match   → SARCASM_ERROR
//   4. more than 200 words     → LONG_REVIEW_ERROR
//   5. otherwise               → LEXICAL_POLARITY_TRAP
//
// classify() is deterministic and total: the same text always
// gets the same category, and every text gets one. Word rules
// are plain substring checks against the lower-cased text, so
// "nothing" triggers the negation rule via "no".
//
// The rule sets are injected at construction instead of being
// module globals, so tests can swap them.

use anyhow::{Context, Result};
use regex::Regex;

use crate::domain::misclassification::ErrorCategory;

/// Words whose presence suggests the model tripped over negation.
pub const NEGATION_WORDS: &[&str] = &["not", "never", "no", "hardly", "scarcely", "barely", "n't"];

/// Words that flip sentiment mid-sentence.
pub const CONTRAST_WORDS: &[&str] = &["but", "however", "although", "though", "yet", "still"];

/// Sarcasm phrases, kept with their original capitalisation.
/// The regexes are built without case folding but run against the
/// lower-cased text, so in practice they almost never fire — see
/// the module tests, which pin this behaviour down instead of
/// quietly changing it.
pub const SARCASM_PATTERNS: &[&str] = &["Yeah, right", "Sure, because", "As if", "Just what I needed"];

/// Reviews longer than this many whitespace words fall into the
/// long-review bucket (when no earlier rule fired).
pub const LONG_REVIEW_WORDS: usize = 200;

/// The ordered-rule error classifier.
pub struct ErrorTaxonomy {
    negation_words: Vec<String>,
    contrast_words: Vec<String>,
    sarcasm_patterns: Vec<Regex>,
    long_review_words: usize,
}

impl ErrorTaxonomy {
    /// Build the taxonomy with the standard rule sets.
    pub fn new() -> Self {
        // The default patterns are fixed literals; compiling them
        // cannot fail.
        Self::with_rules(
            NEGATION_WORDS,
            CONTRAST_WORDS,
            SARCASM_PATTERNS,
            LONG_REVIEW_WORDS,
        )
        .expect("default rule sets always compile")
    }

    /// Build the taxonomy with custom rule sets. Returns an error
    /// if a sarcasm pattern is not a valid regular expression.
    pub fn with_rules(
        negation_words: &[&str],
        contrast_words: &[&str],
        sarcasm_patterns: &[&str],
        long_review_words: usize,
    ) -> Result<Self> {
        let sarcasm_patterns = sarcasm_patterns
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("Invalid sarcasm pattern '{p}'")))
            .collect::<Result<Vec<Regex>>>()?;

        Ok(Self {
            negation_words: negation_words.iter().map(|w| w.to_string()).collect(),
            contrast_words: contrast_words.iter().map(|w| w.to_string()).collect(),
            sarcasm_patterns,
            long_review_words,
        })
    }

    /// Assign one category to the given text. Always succeeds.
    pub fn classify(&self, text: &str) -> ErrorCategory {
        let lower = text.to_lowercase();

        if self.negation_words.iter().any(|w| lower.contains(w.as_str())) {
            return ErrorCategory::NegationError;
        }

        if self.contrast_words.iter().any(|w| lower.contains(w.as_str())) {
            return ErrorCategory::ContrastError;
        }

        if self.sarcasm_patterns.iter().any(|re| re.is_match(&lower)) {
            return ErrorCategory::SarcasmError;
        }

        if text.split_whitespace().count() > self.long_review_words {
            return ErrorCategory::LongReviewError;
        }

        ErrorCategory::LexicalPolarityTrap
    }
}

impl Default for ErrorTaxonomy {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negation_rule_fires() {
        let t = ErrorTaxonomy::new();
        assert_eq!(t.classify("not great"), ErrorCategory::NegationError);
        assert_eq!(t.classify("I didn't like it"), ErrorCategory::NegationError);
    }

    #[test]
    fn test_negation_dominates_later_rules() {
        let t = ErrorTaxonomy::new();
        // Contains "never" (rule 1) and "but" (rule 2) — rule 1 wins.
        assert_eq!(
            t.classify("never boring but very loud"),
            ErrorCategory::NegationError
        );
        // A 250-word review with a negation word is still NEGATION_ERROR.
        let long = format!("not {}", "fine movie great cast ".repeat(70));
        assert_eq!(t.classify(&long), ErrorCategory::NegationError);
    }

    #[test]
    fn test_negation_matches_substrings() {
        let t = ErrorTaxonomy::new();
        // "nothing" contains "no" — the rules are substring checks.
        assert_eq!(t.classify("a thing like this"), ErrorCategory::LexicalPolarityTrap);
        assert_eq!(t.classify("it was a knockout"), ErrorCategory::NegationError);
    }

    #[test]
    fn test_contrast_rule_fires() {
        let t = ErrorTaxonomy::new();
        assert_eq!(t.classify("good but boring"), ErrorCategory::ContrastError);
        assert_eq!(
            t.classify("great cast, however the plot drags"),
            ErrorCategory::ContrastError
        );
    }

    #[test]
    fn test_sarcasm_patterns_rarely_match() {
        // The patterns keep their original capitalisation and the
        // regexes are applied without case folding to a lower-cased
        // text, so the rule is effectively dead for its own phrase
        // set. This pins the observed behaviour.
        let t = ErrorTaxonomy::new();
        assert_eq!(
            t.classify("Yeah, right, a true masterpiece"),
            ErrorCategory::LexicalPolarityTrap
        );
        assert_eq!(
            t.classify("Just what I needed after a week like this"),
            ErrorCategory::LexicalPolarityTrap
        );
    }

    #[test]
    fn test_sarcasm_fires_with_case_folded_rules() {
        // Rule sets are injectable: with a case-insensitive pattern
        // the sarcasm bucket is reachable.
        let t = ErrorTaxonomy::with_rules(&[], &[], &["(?i)as if"], LONG_REVIEW_WORDS).unwrap();
        assert_eq!(
            t.classify("As if anyone would watch this twice"),
            ErrorCategory::SarcasmError
        );
    }

    #[test]
    fn test_long_review_rule() {
        let t = ErrorTaxonomy::new();
        // 201 words, none of which contain a negation or contrast word.
        let long = "ok movie ".repeat(100) + "fin";
        assert_eq!(long.split_whitespace().count(), 201);
        assert_eq!(t.classify(&long), ErrorCategory::LongReviewError);

        // Exactly 200 words is NOT long (strictly greater than).
        let exactly = "ok movie ".repeat(100);
        assert_eq!(exactly.split_whitespace().count(), 200);
        assert_eq!(t.classify(&exactly), ErrorCategory::LexicalPolarityTrap);
    }

    #[test]
    fn test_fallback_bucket() {
        let t = ErrorTaxonomy::new();
        assert_eq!(t.classify("ok movie"), ErrorCategory::LexicalPolarityTrap);
        assert_eq!(t.classify(""), ErrorCategory::LexicalPolarityTrap);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let t = ErrorTaxonomy::new();
        let text = "good but boring";
        let first = t.classify(text);
        for _ in 0..10 {
            assert_eq!(t.classify(text), first);
        }
    }

    #[test]
    fn test_invalid_custom_pattern_is_an_error() {
        assert!(ErrorTaxonomy::with_rules(&[], &[], &["("], 200).is_err());
    }
}
