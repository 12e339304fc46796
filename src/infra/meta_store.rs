// ============================================================
// Layer 6 — Metadata Index Store
// ============================================================
// Exports and loads misclassified_meta.json — the structured
// index of every misclassification of a run, and the SOLE
// contract between the offline pipeline and the interactive
// viewer. No other state is shared.
//
// Every entry is indexed, not just the explained subset: the
// exporter joins entries with their generated report by id, and
// entries without one get the deterministic path their report
// WOULD have. The viewer checks existence and shows "no
// document" — a dangling path is part of the contract, not an
// error.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::misclassification::{DocumentArtifact, MetaEntry, MisclassificationEntry};
use crate::report::pdf::report_file_name;

/// File name of the metadata index.
pub const META_FILE: &str = "misclassified_meta.json";

pub struct MetaStore {
    dir: PathBuf,
    meta_path: PathBuf,
}

impl MetaStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let meta_path = dir.join(META_FILE);
        Self { dir, meta_path }
    }

    /// Serialise the full ordered entry sequence, joined with the
    /// generated documents by id. `reports_dir` supplies the
    /// would-be path for entries outside the explained subset.
    pub fn export(
        &self,
        entries: &[MisclassificationEntry],
        documents: &[DocumentArtifact],
        reports_dir: &Path,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create output directory '{}'", self.dir.display()))?;

        let records: Vec<MetaEntry> = entries
            .iter()
            .map(|entry| {
                let document_path = documents
                    .iter()
                    .find(|d| d.index == entry.id)
                    .map(|d| d.file_path.clone())
                    .unwrap_or_else(|| reports_dir.join(report_file_name(entry.id)));
                MetaEntry::from_entry(entry, document_path.display().to_string())
            })
            .collect();

        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&self.meta_path, json)
            .with_context(|| format!("Cannot write '{}'", self.meta_path.display()))?;

        tracing::info!(
            "Exported {} metadata records to '{}'",
            records.len(),
            self.meta_path.display()
        );
        Ok(self.meta_path.clone())
    }

    /// Load the index back. A missing file means the pipeline has
    /// not been run — the error says so instead of surfacing a
    /// raw I/O fault.
    pub fn load(&self) -> Result<Vec<MetaEntry>> {
        let json = fs::read_to_string(&self.meta_path).with_context(|| {
            format!(
                "Cannot read '{}'. Run 'analyze' first to generate the analysis data.",
                self.meta_path.display()
            )
        })?;

        serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a valid metadata index", self.meta_path.display()))
    }
}
