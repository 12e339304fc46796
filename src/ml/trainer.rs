// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + validation loop using Burn's DataLoader and Adam.
//
// Backend notes:
//   - Training uses Autodiff<NdArray> for gradients
//   - model.valid() returns the model on NdArray (no autodiff)
//   - Validation batcher must also use the inner backend
//   - argmax(1) returns [batch,1] so we flatten before .equal()
//
// The model runs on CPU: this is an offline analysis tool, and
// the downstream inference pass is pinned to CPU anyway.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::ReviewBatcher, dataset::ReviewDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{SentimentModel, SentimentModelConfig};

type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;
type InnerBackend = burn::backend::NdArray;

pub fn run_training(
    cfg: &TrainConfig,
    train_dataset: ReviewDataset,
    val_dataset: ReviewDataset,
    ckpt_manager: CheckpointManager,
) -> Result<()> {
    let device = burn::backend::ndarray::NdArrayDevice::Cpu;

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = SentimentModelConfig::new(
        cfg.vocab_size,
        cfg.max_seq_len,
        cfg.d_model,
        cfg.num_heads,
        cfg.num_layers,
        cfg.d_ff,
        cfg.dropout,
    );
    let mut model: SentimentModel<TrainBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: {} layers, d_model={}",
        cfg.num_layers,
        cfg.d_model
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Training data loader (autodiff backend) ───────────────────────────────
    let train_batcher = ReviewBatcher::<TrainBackend>::new(device);
    let train_loader = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(42)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (inner backend — no autodiff overhead) ─────────
    let val_batcher = ReviewBatcher::<InnerBackend>::new(device);
    let val_loader = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let metrics_logger = MetricsLogger::new(&cfg.checkpoint_dir)?;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(batch.input_ids, batch.labels);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches += 1;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else {
            f64::NAN
        };

        // ── Validation phase ──────────────────────────────────────────────────
        // model.valid() → SentimentModel<InnerBackend>,
        // dropout disabled for deterministic evaluation
        let model_valid = model.valid();

        let mut val_loss_sum = 0.0f64;
        let mut val_batches = 0usize;
        let mut correct = 0usize;
        let mut total_samples = 0usize;

        for batch in val_loader.iter() {
            let logits = model_valid.forward(batch.input_ids);

            let ce = burn::nn::loss::CrossEntropyLossConfig::new().init(&logits.device());
            let batch_loss: f64 = ce
                .forward(logits.clone(), batch.labels.clone())
                .into_scalar()
                .elem::<f64>();
            val_loss_sum += batch_loss;
            val_batches += 1;

            // argmax(1) returns shape [batch, 1] — flatten to [batch]
            // before comparing with the label vector
            let predicted = logits.argmax(1).flatten::<1>(0, 1);

            total_samples += batch.labels.dims()[0];
            let batch_correct: i64 = predicted
                .equal(batch.labels)
                .int()
                .sum()
                .into_scalar()
                .elem::<i64>();
            correct += batch_correct as usize;
        }

        let avg_val_loss = if val_batches > 0 {
            val_loss_sum / val_batches as f64
        } else {
            f64::NAN
        };
        let val_acc = if total_samples > 0 {
            correct as f64 / total_samples as f64
        } else {
            0.0
        };

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | val_acc={:.1}%",
            epoch,
            cfg.epochs,
            avg_train_loss,
            avg_val_loss,
            val_acc * 100.0,
        );

        metrics_logger.log(&EpochMetrics::new(epoch, avg_train_loss, avg_val_loss, val_acc))?;
        ckpt_manager.save_model(&model, epoch)?;
        tracing::info!("Checkpoint saved for epoch {}", epoch);
    }

    tracing::info!("Training complete!");
    Ok(())
}
