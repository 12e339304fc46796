// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `train`   — trains the sentiment model on the corpus
//   2. `analyze` — runs the error-analysis pipeline
//   3. `view`    — browses the misclassified set interactively
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{AnalyzeArgs, Commands, TrainArgs, ViewArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "sentiment-error-analysis",
    version = "0.1.0",
    about = "Train a sentiment model, analyse its misclassifications, and browse them."
)]
pub struct Cli {
    /// The subcommand to run (train, analyze or view)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => Self::run_train(args),
            Commands::Analyze(args) => Self::run_analyze(args),
            Commands::View(args) => Self::run_view(args),
        }
    }

    /// Handles the `train` subcommand.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on reviews in: {}", args.data_dir);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Checkpoint saved.");
        Ok(())
    }

    /// Handles the `analyze` subcommand.
    fn run_analyze(args: AnalyzeArgs) -> Result<()> {
        use crate::application::analyze_use_case::AnalyzeUseCase;

        let use_case = AnalyzeUseCase::new(args.into());
        use_case.execute()?;
        Ok(())
    }

    /// Handles the `view` subcommand.
    fn run_view(args: ViewArgs) -> Result<()> {
        use crate::application::view_use_case::ViewUseCase;

        let use_case = ViewUseCase::new(args.analysis_dir);
        use_case.execute()
    }
}
