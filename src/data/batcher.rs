// ============================================================
// Layer 4 — Review Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<ReviewSample>
// into model-ready tensors.
//
// Input:  Vec of N ReviewSamples, each with sequences of length S
// Output: ReviewBatch with tensors of shape [N, S] plus one
//         label per sample, shape [N]
//
// We flatten all input_ids into one long Vec, then reshape:
// [s1_t1, ..., s1_tS, s2_t1, ..., sN_tS] → [N, S]
//
// All sequences were already padded to the same length in
// ReviewSample::encode, so no dynamic padding is needed here.
//
// Reference: Burn Book §4 (Batcher)

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::dataset::ReviewSample;

// ─── ReviewBatch ──────────────────────────────────────────────────────────────
/// A batch of reviews ready for the model forward pass.
/// B is the Burn Backend — generic so the same batcher works for
/// training (autodiff) and validation (inner backend).
#[derive(Debug, Clone)]
pub struct ReviewBatch<B: Backend> {
    /// Token ID sequences — shape: [batch_size, seq_len]
    pub input_ids: Tensor<B, 2, Int>,

    /// Attention masks — shape: [batch_size, seq_len]
    /// 1 = real token, 0 = padding
    pub attention_mask: Tensor<B, 2, Int>,

    /// Ground truth class indices — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

// ─── ReviewBatcher ────────────────────────────────────────────────────────────
/// Holds the target device so tensors are created in the right
/// place.
#[derive(Clone, Debug)]
pub struct ReviewBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ReviewBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<ReviewSample, ReviewBatch<B>> for ReviewBatcher<B> {
    /// Convert a Vec of ReviewSamples into a single ReviewBatch.
    fn batch(&self, items: Vec<ReviewSample>) -> ReviewBatch<B> {
        let batch_size = items.len();
        // All sequences have the same length (pre-padded)
        let seq_len = items[0].input_ids.len();

        // Flatten input_ids (Burn uses i32 for Int tensors)
        let input_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.input_ids.iter().map(|&x| x as i32))
            .collect();

        let mask_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.attention_mask.iter().map(|&x| x as i32))
            .collect();

        let labels: Vec<i32> = items.iter().map(|s| s.label as i32).collect();

        let input_ids = Tensor::<B, 1, Int>::from_ints(input_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        let attention_mask = Tensor::<B, 1, Int>::from_ints(mask_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        ReviewBatch {
            input_ids,
            attention_mask,
            labels,
        }
    }
}
