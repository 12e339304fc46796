// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `analyze`, `view`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::analyze_use_case::AnalyzeConfig;
use crate::application::train_use_case::TrainConfig;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the sentiment model on a labelled review corpus
    Train(TrainArgs),

    /// Run the error-analysis pipeline over the corpus
    Analyze(AnalyzeArgs),

    /// Browse the misclassified samples interactively
    View(ViewArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Corpus root with pos/ and neg/ subdirectories of text files
    #[arg(long, default_value = "data/cleaned_reviews")]
    pub data_dir: String,

    /// Directory to save model checkpoints and tokenizer
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Maximum number of reviews to train on
    #[arg(long, default_value_t = 500)]
    pub sample_size: usize,

    /// Maximum number of tokens per input sequence
    /// Format: [CLS] review [SEP] + padding
    #[arg(long, default_value_t = 256)]
    pub max_seq_len: usize,

    /// Number of samples processed together in one forward pass
    #[arg(long, default_value_t = 8)]
    pub batch_size: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// How fast the model learns — too high causes instability,
    /// too low causes slow convergence
    #[arg(long, default_value_t = 2e-4)]
    pub lr: f64,

    /// Hidden dimension of the transformer (d_model in the paper)
    #[arg(long, default_value_t = 128)]
    pub d_model: usize,

    /// Number of attention heads in multi-head attention
    /// d_model must be divisible by num_heads
    #[arg(long, default_value_t = 4)]
    pub num_heads: usize,

    /// Number of stacked encoder layers
    #[arg(long, default_value_t = 4)]
    pub num_layers: usize,

    /// Inner dimension of the feed-forward network
    /// Typically 4x d_model
    #[arg(long, default_value_t = 512)]
    pub d_ff: usize,

    /// Dropout probability — randomly zeroes activations during
    /// training to prevent overfitting
    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,

    /// Total number of unique tokens the model can recognise
    #[arg(long, default_value_t = 30522)]
    pub vocab_size: usize,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_dir: a.data_dir,
            checkpoint_dir: a.checkpoint_dir,
            sample_size: a.sample_size,
            max_seq_len: a.max_seq_len,
            batch_size: a.batch_size,
            epochs: a.epochs,
            lr: a.lr,
            d_model: a.d_model,
            num_heads: a.num_heads,
            num_layers: a.num_layers,
            d_ff: a.d_ff,
            dropout: a.dropout,
            vocab_size: a.vocab_size,
        }
    }
}

/// All arguments for the `analyze` command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Corpus root with pos/ and neg/ subdirectories of text files
    #[arg(long, default_value = "data/cleaned_reviews")]
    pub data_dir: String,

    /// Directory where checkpoints were saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Directory for the distribution CSV, chart and metadata index
    #[arg(long, default_value = "analysis")]
    pub output_dir: String,

    /// Directory for the per-sample PDF reports
    #[arg(long, default_value = "reports")]
    pub reports_dir: String,

    /// Maximum number of reviews to run inference over
    #[arg(long, default_value_t = 500)]
    pub sample_size: usize,

    /// How many misclassifications get explained and documented
    #[arg(long, default_value_t = 5)]
    pub shap_samples: usize,

    /// Character cap applied to each review before classification
    #[arg(long, default_value_t = 512)]
    pub max_text_len: usize,
}

impl From<AnalyzeArgs> for AnalyzeConfig {
    fn from(a: AnalyzeArgs) -> Self {
        AnalyzeConfig {
            data_dir: a.data_dir,
            checkpoint_dir: a.checkpoint_dir,
            output_dir: a.output_dir,
            reports_dir: a.reports_dir,
            sample_size: a.sample_size,
            shap_samples: a.shap_samples,
            max_text_len: a.max_text_len,
        }
    }
}

/// All arguments for the `view` command
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Directory holding the exported metadata index
    #[arg(long, default_value = "analysis")]
    pub analysis_dir: String,
}
