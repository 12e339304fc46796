// ============================================================
// Layer 4 — Review Dataset
// ============================================================
// One fully tokenised and padded training sample, plus the
// Dataset implementation Burn's DataLoader iterates over.
//
// Sequence format: [CLS] review tokens [SEP] [PAD]...
// mirroring what the inferencer builds at analysis time — the
// model must see the same shape in training and inference.

use anyhow::Result;
use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};
use tokenizers::Tokenizer;

use crate::domain::sample::Label;

/// BERT-convention special token ids used by the tokenizer store.
pub const CLS_ID: u32 = 101;
pub const SEP_ID: u32 = 102;
pub const PAD_ID: u32 = 0;

/// One tokenised review ready for the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSample {
    pub input_ids: Vec<u32>,
    pub attention_mask: Vec<u32>,
    /// Class index: 0 = negative, 1 = positive
    pub label: usize,
}

impl ReviewSample {
    /// Tokenise one labelled review into the fixed-length input
    /// the model expects.
    pub fn encode(
        text: &str,
        label: Label,
        tokenizer: &Tokenizer,
        max_seq_len: usize,
    ) -> Result<Self> {
        let (input_ids, attention_mask) = encode_input(text, tokenizer, max_seq_len)?;
        Ok(Self {
            input_ids,
            attention_mask,
            label: u8::from(label) as usize,
        })
    }
}

/// Build the model input for one text: [CLS] tokens [SEP],
/// truncated to max_seq_len and padded with [PAD]. Returns
/// (input_ids, attention_mask). Shared by training encoding and
/// the inferencer so both sides see the exact same shape.
pub fn encode_input(
    text: &str,
    tokenizer: &Tokenizer,
    max_seq_len: usize,
) -> Result<(Vec<u32>, Vec<u32>)> {
    let encoding = tokenizer
        .encode(text, false)
        .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?;

    let mut input_ids: Vec<u32> = vec![CLS_ID];
    input_ids.extend_from_slice(encoding.get_ids());
    input_ids.push(SEP_ID);
    input_ids.truncate(max_seq_len);

    // Attention mask: 1 for real tokens, 0 for padding
    let mut attention_mask = vec![1u32; input_ids.len()];
    while input_ids.len() < max_seq_len {
        input_ids.push(PAD_ID);
        attention_mask.push(0);
    }

    Ok((input_ids, attention_mask))
}

/// The Burn-facing dataset of tokenised reviews.
pub struct ReviewDataset {
    samples: Vec<ReviewSample>,
}

impl ReviewDataset {
    pub fn new(samples: Vec<ReviewSample>) -> Self {
        Self { samples }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Dataset<ReviewSample> for ReviewDataset {
    fn get(&self, index: usize) -> Option<ReviewSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_get_and_len() {
        let sample = ReviewSample {
            input_ids: vec![CLS_ID, 5, SEP_ID],
            attention_mask: vec![1, 1, 1],
            label: 1,
        };
        let ds = ReviewDataset::new(vec![sample.clone()]);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.get(0).unwrap().label, 1);
        assert!(ds.get(1).is_none());
    }
}
