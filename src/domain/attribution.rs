// ============================================================
// Layer 3 — Attribution Domain Types
// ============================================================
// Per-token contribution scores produced by the explainer:
// how much each word of the input pushed the model towards the
// class it actually predicted. Positive score = the word
// supported the (wrong) prediction; negative = it argued
// against it.

use serde::{Deserialize, Serialize};

use crate::domain::sample::Label;

/// One word of the input with its contribution score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAttribution {
    pub token: String,
    pub score: f64,
}

/// A full explanation for one text: the class being explained
/// and one score per (bounded) input token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribution {
    /// The class the scores are attributed to — the model's
    /// predicted label for this text.
    pub predicted: Label,

    pub tokens: Vec<TokenAttribution>,
}

impl Attribution {
    /// The k tokens with the largest absolute influence,
    /// most influential first.
    pub fn top_tokens(&self, k: usize) -> Vec<&TokenAttribution> {
        let mut ranked: Vec<&TokenAttribution> = self.tokens.iter().collect();
        ranked.sort_by(|a, b| {
            b.score
                .abs()
                .partial_cmp(&a.score.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(k);
        ranked
    }
}
