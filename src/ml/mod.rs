// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly — only this one
// (plus the data batcher/dataset, which implement Burn's
// loading traits).
//
// What's in this layer:
//
//   model.rs      — The transformer encoder architecture with a
//                   2-class sentiment head:
//                   • Token embeddings
//                   • Positional embeddings
//                   • Multi-head self-attention
//                   • Feed-forward networks (GELU activation)
//                   • Layer normalisation
//                   • Residual connections
//                   • [CLS]-pooled classification head
//
//   trainer.rs    — The training loop: forward pass, cross-
//                   entropy loss, backward pass, Adam step,
//                   per-epoch metrics and checkpointing
//
//   inferencer.rs — The inference engine. Loads a checkpoint,
//                   tokenises input, runs the model, softmaxes
//                   the logits into a Prediction. This is the
//                   SentimentClassifier the analysis pipeline
//                   sees.
//
//   explainer.rs  — Occlusion-based attribution. Deliberately
//                   framework-free: it works entirely through
//                   the SentimentClassifier trait by masking
//                   one word at a time.
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Vaswani et al. (2017) Attention Is All You Need

/// Transformer encoder sentiment model architecture
pub mod model;

/// Full training loop with validation and checkpointing
pub mod trainer;

/// Inference engine — loads checkpoint and predicts sentiment
pub mod inferencer;

/// Occlusion attribution over the classifier trait
pub mod explainer;
