// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from raw review files to model-ready tensor
// batches. The pipeline flows in this order:
//
//   pos/ and neg/ text files
//       │
//       ▼
//   ReviewCorpusLoader → reads files, labels by subdirectory
//       │
//       ▼
//   Preprocessor       → cleans text (markup, whitespace)
//       │
//       ▼
//   Tokenizer          → converts words to token ID numbers
//       │
//       ▼
//   ReviewDataset      → implements Burn's Dataset trait
//       │
//       ▼
//   ReviewBatcher      → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader         → feeds batches to the training loop
//
// The analysis pass uses only the first step — the classifier
// collaborator does its own tokenisation behind the trait.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads labelled reviews from pos/ and neg/ directories
pub mod corpus;

/// Cleans and normalises raw review text
pub mod preprocessor;

/// Implements Burn's Dataset trait for tokenised reviews
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits data into train/validation sets
pub mod splitter;
