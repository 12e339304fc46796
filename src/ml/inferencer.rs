// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Loads the latest checkpoint and turns text into Predictions.
// This is the concrete SentimentClassifier the analysis
// pipeline works against; nothing outside this file knows the
// model is a Burn transformer.

use anyhow::{bail, Result};
use burn::prelude::*;
use tokenizers::Tokenizer;

use crate::data::dataset::encode_input;
use crate::domain::prediction::Prediction;
use crate::domain::traits::SentimentClassifier;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{SentimentModel, SentimentModelConfig};

type InferBackend = burn::backend::NdArray;

pub struct Inferencer {
    model: SentimentModel<InferBackend>,
    tokenizer: Tokenizer,
    max_seq_len: usize,
    device: burn::backend::ndarray::NdArrayDevice,
}

impl Inferencer {
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager, tokenizer: Tokenizer) -> Result<Self> {
        let device = burn::backend::ndarray::NdArrayDevice::Cpu;
        let cfg = ckpt_manager.load_config()?;
        // Dropout 0 — inference is deterministic
        let model_cfg = SentimentModelConfig::new(
            cfg.vocab_size,
            cfg.max_seq_len,
            cfg.d_model,
            cfg.num_heads,
            cfg.num_layers,
            cfg.d_ff,
            0.0,
        );
        let model: SentimentModel<InferBackend> = model_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint");
        tracing::info!("Model label mapping: {{0: NEGATIVE, 1: POSITIVE}}");
        Ok(Self {
            model,
            tokenizer,
            max_seq_len: cfg.max_seq_len,
            device,
        })
    }
}

impl SentimentClassifier for Inferencer {
    fn classify(&self, text: &str) -> Result<Prediction> {
        // Same [CLS] text [SEP] shape the model was trained on
        let (input_ids, _attention_mask) = encode_input(text, &self.tokenizer, self.max_seq_len)?;

        let input_flat: Vec<i32> = input_ids.iter().map(|&x| x as i32).collect();
        let input_tensor =
            Tensor::<InferBackend, 1, Int>::from_ints(input_flat.as_slice(), &self.device)
                .unsqueeze::<2>();

        let logits = self.model.forward(input_tensor); // [1, 2]

        let probs: Vec<f32> = burn::tensor::activation::softmax(logits, 1)
            .into_data()
            .to_vec::<f32>()
            .unwrap_or_default();

        if probs.len() != 2 {
            bail!("Unexpected logit shape from sentiment model");
        }

        // Class index 0 = NEGATIVE, 1 = POSITIVE
        let prediction = Prediction::from_scores(probs[1] as f64, probs[0] as f64);

        tracing::debug!(
            "Classified as {} {}",
            prediction.label,
            prediction.confidence,
        );

        Ok(prediction)
    }
}
