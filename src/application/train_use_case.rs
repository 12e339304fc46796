// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load labelled reviews     (Layer 4 - data)
//   Step 2: Clean the text            (Layer 4 - data)
//   Step 3: Build tokenizer           (Layer 6 - infra)
//   Step 4: Encode training samples   (Layer 4 - data)
//   Step 5: Split train/validation    (Layer 4 - data)
//   Step 6: Build datasets            (Layer 4 - data)
//   Step 7: Save config               (Layer 6 - infra)
//   Step 8: Run training loop         (Layer 5 - ml)
//
// The result is a checkpoint directory the analyze command can
// load a ready classifier from.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    corpus::ReviewCorpusLoader,
    dataset::{ReviewDataset, ReviewSample},
    preprocessor::Preprocessor,
    splitter::split_train_val,
};
use crate::domain::sample::Label;
use crate::domain::traits::CorpusSource;
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run. Serialisable so the
// checkpoint manager can persist it and the inferencer can
// rebuild the exact architecture later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_dir: String,
    pub checkpoint_dir: String,
    pub sample_size: usize,
    pub max_seq_len: usize,
    pub batch_size: usize,
    pub epochs: usize,
    pub lr: f64,
    pub d_model: usize,
    pub num_heads: usize,
    pub num_layers: usize,
    pub d_ff: usize,
    pub dropout: f64,
    pub vocab_size: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_dir: "data/cleaned_reviews".to_string(),
            checkpoint_dir: "checkpoints".to_string(),
            sample_size: 500,
            max_seq_len: 256,
            batch_size: 8,
            epochs: 10,
            lr: 2e-4,
            d_model: 128,
            num_heads: 4,
            num_layers: 4,
            d_ff: 512,
            dropout: 0.1,
            vocab_size: 30522,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load labelled reviews ─────────────────────────────────────
        tracing::info!("Loading review corpus from '{}'", cfg.data_dir);
        let loader = ReviewCorpusLoader::new(&cfg.data_dir, cfg.sample_size);
        let raw_samples = loader.load_all()?;
        if raw_samples.is_empty() {
            bail!(
                "No review samples found under '{}'. \
                 Expected pos/ and neg/ subdirectories with text files.",
                cfg.data_dir
            );
        }

        // ── Step 2: Clean / normalise text ────────────────────────────────────
        let preprocessor = Preprocessor::new();
        let cleaned: Vec<(String, Label)> = raw_samples
            .iter()
            .map(|s| (preprocessor.clean(&s.text), s.label))
            .collect();

        // ── Step 3: Build / load tokenizer ────────────────────────────────────
        // If a tokenizer was already built and saved, load it, so
        // the vocabulary stays stable across runs.
        let texts: Vec<String> = cleaned.iter().map(|(text, _)| text.clone()).collect();
        let tok_store = TokenizerStore::new(&cfg.checkpoint_dir);
        let tokenizer = tok_store.load_or_build(&texts, cfg.vocab_size)?;

        // ── Step 4: Encode training samples ───────────────────────────────────
        let samples = cleaned
            .iter()
            .map(|(text, label)| ReviewSample::encode(text, *label, &tokenizer, cfg.max_seq_len))
            .collect::<Result<Vec<ReviewSample>>>()?;
        tracing::info!("Encoded {} training samples", samples.len());

        // ── Step 5: Train / validation split (80/20) ──────────────────────────
        let (train_samples, val_samples) = split_train_val(samples, 0.8);
        tracing::info!(
            "Split: {} train, {} validation",
            train_samples.len(),
            val_samples.len()
        );

        // ── Step 6: Build Burn datasets ───────────────────────────────────────
        let train_dataset = ReviewDataset::new(train_samples);
        let val_dataset = ReviewDataset::new(val_samples);

        // ── Step 7: Save config for the analysis pass ─────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_config(cfg)?;

        // ── Step 8: Run training loop (Layer 5) ───────────────────────────────
        run_training(cfg, train_dataset, val_dataset, ckpt_manager)?;

        Ok(())
    }
}
