// ============================================================
// Layer 4 — Review Corpus Loader
// ============================================================
// Loads labelled reviews from a directory laid out as:
//
//   <root>/pos/*.txt   → Label::Positive
//   <root>/neg/*.txt   → Label::Negative
//
// The label is implied entirely by the subdirectory; the files
// themselves are plain UTF-8 text, one review per file.
//
// The file list of each subdirectory is shuffled before reading
// so a bounded sample is not biased by directory order, and
// loading stops as soon as `limit` samples are collected — the
// cap can therefore stop inside the first label folder.
//
// Reference: Rust Book §9 (Error Handling)
//            rand crate documentation

use anyhow::{bail, Context, Result};
use rand::seq::SliceRandom;
use std::{fs, path::PathBuf};

use crate::domain::sample::{Label, Sample};
use crate::domain::traits::CorpusSource;

/// Loads up to `limit` labelled reviews from a corpus root.
/// Implements the CorpusSource trait from Layer 3.
pub struct ReviewCorpusLoader {
    root: PathBuf,
    limit: usize,
}

impl ReviewCorpusLoader {
    pub fn new(root: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            root: root.into(),
            limit,
        }
    }
}

impl CorpusSource for ReviewCorpusLoader {
    fn load_all(&self) -> Result<Vec<Sample>> {
        if !self.root.exists() {
            bail!(
                "Corpus directory '{}' not found. \
                 Point --data-dir at a folder with pos/ and neg/ subdirectories.",
                self.root.display()
            );
        }

        let mut rng = rand::thread_rng();
        let mut samples: Vec<Sample> = Vec::new();

        for (subdir, label) in [("pos", Label::Positive), ("neg", Label::Negative)] {
            let folder = self.root.join(subdir);

            if !folder.exists() {
                tracing::warn!(
                    "Label directory '{}' does not exist — skipping",
                    folder.display()
                );
                continue;
            }

            // Collect and shuffle the file list before reading
            let mut files: Vec<PathBuf> = fs::read_dir(&folder)
                .with_context(|| format!("Cannot read directory '{}'", folder.display()))?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_file())
                .collect();
            files.shuffle(&mut rng);

            for path in files {
                if samples.len() >= self.limit {
                    tracing::info!("Sample cap of {} reached", self.limit);
                    return Ok(samples);
                }

                match fs::read_to_string(&path) {
                    Ok(text) => samples.push(Sample::new(text.trim(), label)),
                    // Log a warning but continue — don't fail on one bad file
                    Err(e) => {
                        tracing::warn!("Skipping '{}': {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("Loaded {} review samples", samples.len());
        Ok(samples)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_corpus(root: &std::path::Path, pos: &[&str], neg: &[&str]) {
        fs::create_dir_all(root.join("pos")).unwrap();
        fs::create_dir_all(root.join("neg")).unwrap();
        for (i, text) in pos.iter().enumerate() {
            fs::write(root.join("pos").join(format!("{i}.txt")), text).unwrap();
        }
        for (i, text) in neg.iter().enumerate() {
            fs::write(root.join("neg").join(format!("{i}.txt")), text).unwrap();
        }
    }

    #[test]
    fn test_loads_both_labels() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path(), &["great movie"], &["awful movie"]);

        let loader = ReviewCorpusLoader::new(dir.path(), 100);
        let samples = loader.load_all().unwrap();
        assert_eq!(samples.len(), 2);
        assert!(samples
            .iter()
            .any(|s| s.label == Label::Positive && s.text == "great movie"));
        assert!(samples
            .iter()
            .any(|s| s.label == Label::Negative && s.text == "awful movie"));
    }

    #[test]
    fn test_respects_sample_cap() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path(), &["a", "b", "c"], &["d", "e", "f"]);

        let loader = ReviewCorpusLoader::new(dir.path(), 4);
        let samples = loader.load_all().unwrap();
        assert_eq!(samples.len(), 4);
    }

    #[test]
    fn test_trims_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path(), &["  padded review \n"], &[]);

        let loader = ReviewCorpusLoader::new(dir.path(), 10);
        let samples = loader.load_all().unwrap();
        assert_eq!(samples[0].text, "padded review");
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ReviewCorpusLoader::new(dir.path().join("nope"), 10);
        let err = loader.load_all().unwrap_err();
        assert!(err.to_string().contains("--data-dir"));
    }

    #[test]
    fn test_missing_label_directory_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pos")).unwrap();
        fs::write(dir.path().join("pos").join("0.txt"), "fine").unwrap();

        let loader = ReviewCorpusLoader::new(dir.path(), 10);
        let samples = loader.load_all().unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].label, Label::Positive);
    }
}
