// ============================================================
// Layer 2 — AnalyzeUseCase
// ============================================================
// The full offline error-analysis pipeline, in order:
//
//   Step 1: Load labelled reviews       (Layer 4 - data)
//   Step 2: Load tokenizer + checkpoint (Layer 6 / Layer 5)
//   Step 3: Inference pass              (Layer 4b - analysis)
//   Step 4: Error distribution          (Layer 4b - analysis)
//   Step 5: Explain + PDF reports       (Layer 5 / Layer 4c)
//   Step 6: Export metadata index       (Layer 6 - infra)
//
// Steps 3-6 are separated into run_with() so tests can drive
// the whole pipeline with stub collaborators instead of a
// trained model.
//
// Failure policy: any collaborator or artifact-write failure
// aborts the run. This is an interactive offline tool — the
// human re-runs it.

use anyhow::{bail, Result};
use std::path::Path;

use crate::analysis::aggregator::{InferenceRun, RunMetrics};
use crate::analysis::distribution::ErrorDistribution;
use crate::data::corpus::ReviewCorpusLoader;
use crate::domain::misclassification::DocumentArtifact;
use crate::domain::sample::Sample;
use crate::domain::traits::{AttributionExplainer, CorpusSource, SentimentClassifier};
use crate::infra::{
    checkpoint::CheckpointManager, meta_store::MetaStore, tokenizer_store::TokenizerStore,
};
use crate::ml::{explainer::OcclusionExplainer, inferencer::Inferencer};
use crate::report::pdf::PdfReporter;

// ─── Analysis Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub data_dir: String,
    pub checkpoint_dir: String,
    /// Where the CSV, chart and metadata index land
    pub output_dir: String,
    /// Where per-sample PDF reports land
    pub reports_dir: String,
    pub sample_size: usize,
    /// Only this many misclassifications get explained and
    /// documented — a cost cap, not a completeness guarantee
    pub shap_samples: usize,
    /// Character cap applied before each classifier call
    pub max_text_len: usize,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            data_dir: "data/cleaned_reviews".to_string(),
            checkpoint_dir: "checkpoints".to_string(),
            output_dir: "analysis".to_string(),
            reports_dir: "reports".to_string(),
            sample_size: 500,
            shap_samples: 5,
            max_text_len: 512,
        }
    }
}

// ─── AnalyzeUseCase ───────────────────────────────────────────────────────────
pub struct AnalyzeUseCase {
    config: AnalyzeConfig,
}

impl AnalyzeUseCase {
    pub fn new(config: AnalyzeConfig) -> Self {
        Self { config }
    }

    /// Execute the pipeline with the real collaborators: the
    /// Burn inferencer from the checkpoint directory and the
    /// occlusion explainer.
    pub fn execute(&self) -> Result<RunMetrics> {
        let cfg = &self.config;

        // ── Step 1: Load labelled reviews ─────────────────────────────────────
        tracing::info!("Loading review corpus from '{}'", cfg.data_dir);
        let loader = ReviewCorpusLoader::new(&cfg.data_dir, cfg.sample_size);
        let samples = loader.load_all()?;
        if samples.is_empty() {
            bail!(
                "No review samples found under '{}'. \
                 Expected pos/ and neg/ subdirectories with text files.",
                cfg.data_dir
            );
        }

        // ── Step 2: Load tokenizer + model checkpoint ─────────────────────────
        tracing::info!("Loading model...");
        let tokenizer = TokenizerStore::new(&cfg.checkpoint_dir).load()?;
        let ckpt = CheckpointManager::new(&cfg.checkpoint_dir);
        let classifier = Inferencer::from_checkpoint(&ckpt, tokenizer)?;
        let explainer = OcclusionExplainer::new();

        self.run_with(&samples, &classifier, &explainer)
    }

    /// Steps 3-6 against injected collaborators.
    pub fn run_with(
        &self,
        samples: &[Sample],
        classifier: &dyn SentimentClassifier,
        explainer: &dyn AttributionExplainer,
    ) -> Result<RunMetrics> {
        let cfg = &self.config;

        // ── Step 3: Inference pass ────────────────────────────────────────────
        tracing::info!("Running inference over {} samples...", samples.len());
        let run = InferenceRun::new(cfg.max_text_len);
        let (metrics, entries) = run.run(samples, classifier)?;

        println!("\n================ RESULTS ================");
        println!("Total Reviews: {}", metrics.total);
        println!("Accuracy: {:.2}%", metrics.accuracy * 100.0);
        println!("Misclassified: {}", metrics.misclassified);

        // ── Step 4: Error distribution artifacts ──────────────────────────────
        let distribution = ErrorDistribution::from_entries(&entries);
        if !distribution.is_empty() {
            println!("\n==== Error Distribution ====");
            for (category, count) in distribution.most_common() {
                println!("{:<25} : {}", category.as_str(), count);
            }
        }
        distribution.write_artifacts(Path::new(&cfg.output_dir))?;

        // ── Step 5: Explain + document the first N entries ────────────────────
        let reporter = PdfReporter::new(&cfg.reports_dir);
        let mut documents: Vec<DocumentArtifact> = Vec::new();

        for entry in entries.iter().take(cfg.shap_samples) {
            let attribution = explainer.explain(classifier, &entry.text)?;
            let top: Vec<String> = attribution
                .top_tokens(5)
                .iter()
                .map(|t| format!("{}({:+.3})", t.token, t.score))
                .collect();
            tracing::info!(
                "Top attribution tokens for sample {}: {}",
                entry.id,
                top.join(", ")
            );

            let path = reporter.generate(entry)?;
            println!(
                "Generated report for misclassified sample {}: {}",
                entry.id,
                path.display()
            );
            documents.push(DocumentArtifact {
                index: entry.id,
                file_path: path,
            });
        }

        // ── Step 6: Export the metadata index ─────────────────────────────────
        let store = MetaStore::new(&cfg.output_dir);
        store.export(&entries, &documents, Path::new(&cfg.reports_dir))?;

        println!("\nDone.");
        Ok(metrics)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::view_use_case::{distinct_categories, filter_by_category};
    use crate::domain::misclassification::ErrorCategory;
    use crate::domain::prediction::Prediction;
    use crate::domain::sample::Label;

    /// Stub model that predicts POSITIVE for everything.
    struct AlwaysPositive;

    impl SentimentClassifier for AlwaysPositive {
        fn classify(&self, _text: &str) -> Result<Prediction> {
            Ok(Prediction::from_scores(0.93, 0.07))
        }
    }

    /// The canonical scenario: 10 samples, 3 misclassified with
    /// one entry per expected category, run through the real
    /// pipeline (run_with) with a stub model, then browsed
    /// through the viewer's filter.
    #[test]
    fn test_end_to_end_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("analysis");
        let reports_dir = dir.path().join("reports");

        // 7 positives the stub gets right, 3 negatives it misses
        let long_review = "ok movie ".repeat(100) + "fin"; // 201 words
        let mut samples = vec![
            Sample::new("not great", Label::Negative),
            Sample::new("good but boring", Label::Negative),
            Sample::new(long_review, Label::Negative),
        ];
        for _ in 0..7 {
            samples.push(Sample::new("a fine film", Label::Positive));
        }

        let config = AnalyzeConfig {
            output_dir: output_dir.to_string_lossy().into_owned(),
            reports_dir: reports_dir.to_string_lossy().into_owned(),
            shap_samples: 2,
            // High enough to keep all 201 words of the long review
            max_text_len: 4096,
            ..AnalyzeConfig::default()
        };
        let use_case = AnalyzeUseCase::new(config);

        let metrics = use_case
            .run_with(&samples, &AlwaysPositive, &OcclusionExplainer::new())
            .unwrap();
        assert_eq!(metrics.total, 10);
        assert_eq!(metrics.misclassified, 3);
        assert!((metrics.accuracy - 0.7).abs() < 1e-9);

        // Distribution CSV: three rows, each count 1
        let csv = std::fs::read_to_string(output_dir.join("error_distribution.csv")).unwrap();
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.ends_with(",1")));
        assert!(output_dir.join("error_distribution.svg").exists());

        // Reload the exported index
        let loaded = MetaStore::new(&output_dir).load().unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].error_type, ErrorCategory::NegationError);
        assert_eq!(loaded[1].error_type, ErrorCategory::ContrastError);
        assert_eq!(loaded[2].error_type, ErrorCategory::LongReviewError);

        // Only the first shap_samples entries have real documents;
        // the third points at a would-be path the viewer reports
        // as missing
        assert!(Path::new(&loaded[0].document_path).exists());
        assert!(Path::new(&loaded[1].document_path).exists());
        assert!(!Path::new(&loaded[2].document_path).exists());

        // Viewer filter: CONTRAST_ERROR yields exactly the
        // "good but boring" entry
        let categories = distinct_categories(&loaded);
        assert_eq!(categories.len(), 3);
        let filtered = filter_by_category(&loaded, Some(ErrorCategory::ContrastError));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].text, "good but boring");
        assert_eq!(filtered[0].id, 2);

        // ALL wildcard keeps everything
        assert_eq!(filter_by_category(&loaded, None).len(), 3);
    }

    #[test]
    fn test_pipeline_with_no_misclassifications() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("analysis");

        let samples = vec![
            Sample::new("wonderful", Label::Positive),
            Sample::new("a joy to watch", Label::Positive),
        ];
        let config = AnalyzeConfig {
            output_dir: output_dir.to_string_lossy().into_owned(),
            reports_dir: dir.path().join("reports").to_string_lossy().into_owned(),
            ..AnalyzeConfig::default()
        };
        let use_case = AnalyzeUseCase::new(config);

        let metrics = use_case
            .run_with(&samples, &AlwaysPositive, &OcclusionExplainer::new())
            .unwrap();
        assert_eq!(metrics.misclassified, 0);

        // Reporter degraded to a no-op, exporter still wrote an
        // (empty) index
        assert!(!output_dir.join("error_distribution.csv").exists());
        assert!(!output_dir.join("error_distribution.svg").exists());
        assert!(MetaStore::new(&output_dir).load().unwrap().is_empty());
    }
}
