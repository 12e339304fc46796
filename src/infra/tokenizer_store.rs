// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Manages tokenizer building, saving, and loading.
//
// In tokenizers 0.15, train_from_files requires Trainer::Model
// to equal ModelWrapper. The workable approach is to build the
// tokenizer JSON manually — word-level vocabulary from corpus
// frequencies plus BERT-convention special tokens — and load it
// back, bypassing the trainer type mismatch entirely.
//
// [MASK] (id 103) stays in the special set even though training
// never emits it: the occlusion explainer substitutes it into
// texts at analysis time, and it must map to a real id instead
// of decomposing into [UNK] pieces.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokenizers::Tokenizer;

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<String>) -> Self {
        Self {
            dir: PathBuf::from(dir.into()),
        }
    }

    /// Load existing tokenizer or build a new one from review texts
    pub fn load_or_build(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        let tok_path = self.dir.join("tokenizer.json");
        if tok_path.exists() {
            tracing::info!("Loading existing tokenizer from disk");
            self.load()
        } else {
            tracing::info!("Building new tokenizer (vocab_size={})", vocab_size);
            self.build_and_save(texts, vocab_size)
        }
    }

    /// Load a previously saved tokenizer from its JSON file
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.dir.join("tokenizer.json");
        Tokenizer::from_file(&path).map_err(|e| {
            anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}. Have you run 'train' first?",
                path.display(),
                e
            )
        })
    }

    /// Build a word-level vocabulary from the review corpus and
    /// write a valid tokenizer JSON directly.
    fn build_and_save(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        std::fs::create_dir_all(&self.dir).ok();

        // ── Step 1: Build vocabulary from word frequencies ────────────────────
        use std::collections::HashMap;
        let mut freq: HashMap<String, usize> = HashMap::new();

        for text in texts {
            for word in text.split_whitespace() {
                // Normalise to lowercase for consistency
                let w = word.to_lowercase();
                // Strip punctuation from edges
                let w = w.trim_matches(|c: char| !c.is_alphanumeric());
                if !w.is_empty() {
                    *freq.entry(w.to_string()).or_insert(0) += 1;
                }
            }
        }

        // Sort by frequency descending, take top vocab_size - 5
        // (reserve 5 slots for special tokens)
        let mut words: Vec<(String, usize)> = freq.into_iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1));
        let max_words = vocab_size.saturating_sub(5);
        words.truncate(max_words);

        // ── Step 2: Build vocab JSON ──────────────────────────────────────────
        // Special tokens get fixed IDs matching BERT convention
        let mut vocab = serde_json::json!({
            "[PAD]":  0,
            "[UNK]":  1,
            "[CLS]":  101,
            "[SEP]":  102,
            "[MASK]": 103,
        });

        let mut next_id = 104usize;
        for (word, _) in &words {
            if vocab.get(word).is_none() {
                vocab[word] = serde_json::json!(next_id);
                next_id += 1;
            }
        }

        // ── Step 3: Write tokenizer JSON in HuggingFace format ────────────────
        // This format is what Tokenizer::from_file() expects
        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                {"id": 0,   "content": "[PAD]",  "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 1,   "content": "[UNK]",  "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 101, "content": "[CLS]",  "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 102, "content": "[SEP]",  "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 103, "content": "[MASK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
            ],
            "normalizer": {
                "type": "BertNormalizer",
                "clean_text": true,
                "handle_chinese_chars": true,
                "strip_accents": null,
                "lowercase": true
            },
            "pre_tokenizer": {
                "type": "Whitespace"
            },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": "[UNK]"
            }
        });

        let tok_path = self.dir.join("tokenizer.json");
        std::fs::write(&tok_path, serde_json::to_string_pretty(&tokenizer_json)?)
            .with_context(|| "Cannot write tokenizer JSON")?;

        tracing::info!(
            "Tokenizer built with {} words, saved to '{}'",
            next_id,
            tok_path.display()
        );

        // Load back as a proper Tokenizer instance
        Tokenizer::from_file(&tok_path)
            .map_err(|e| anyhow::anyhow!("Cannot reload tokenizer: {e}"))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_load_and_encode() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenizerStore::new(dir.path().to_str().unwrap());

        let texts = vec![
            "a great movie".to_string(),
            "a boring movie".to_string(),
        ];
        let tokenizer = store.load_or_build(&texts, 1000).unwrap();

        // Known words encode to real ids, not [UNK] (id 1)
        let enc = tokenizer.encode("great movie", false).unwrap();
        assert_eq!(enc.get_ids().len(), 2);
        assert!(enc.get_ids().iter().all(|&id| id != 1));

        // The mask token survives as a single id
        let enc = tokenizer.encode("great [MASK]", false).unwrap();
        assert!(enc.get_ids().contains(&103));

        // Second call loads the saved file instead of rebuilding
        let reloaded = store.load_or_build(&[], 1000).unwrap();
        let enc2 = reloaded.encode("great movie", false).unwrap();
        assert_eq!(enc.get_ids()[0], enc2.get_ids()[0]);
    }

    #[test]
    fn test_missing_tokenizer_has_remedial_message() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenizerStore::new(dir.path().join("empty").to_str().unwrap());
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("'train'"));
    }
}
