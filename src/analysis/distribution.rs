// ============================================================
// Layer 4b — Error Distribution Reporter
// ============================================================
// Counts how often each ErrorCategory occurs in a run's
// misclassification set and writes two artifacts:
//
//   error_distribution.csv — "Error Type,Count" header plus one
//     row per category present, descending by count
//   error_distribution.svg — a bar chart of the same numbers
//
// Ordering is stable: ties keep the order in which categories
// were first encountered, so repeated runs over the same data
// produce identical artifacts.
//
// An empty misclassification set is a safe no-op — the reporter
// logs and writes nothing rather than producing empty files.

use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::fmt::Display;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::misclassification::{ErrorCategory, MisclassificationEntry};

/// File name of the tabular artifact.
pub const CSV_FILE: &str = "error_distribution.csv";

/// File name of the chart artifact. SVG keeps the chart free of
/// native font dependencies (the text is emitted as-is).
pub const PLOT_FILE: &str = "error_distribution.svg";

/// Category frequencies for one run, in first-encounter order.
pub struct ErrorDistribution {
    counts: Vec<(ErrorCategory, usize)>,
    total: usize,
}

impl ErrorDistribution {
    /// Count categories over the given entries.
    pub fn from_entries(entries: &[MisclassificationEntry]) -> Self {
        let mut counts: Vec<(ErrorCategory, usize)> = Vec::new();

        for entry in entries {
            match counts.iter_mut().find(|(cat, _)| *cat == entry.error_type) {
                Some((_, n)) => *n += 1,
                None => counts.push((entry.error_type, 1)),
            }
        }

        Self {
            counts,
            total: entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Total number of counted entries.
    pub fn total(&self) -> usize {
        self.total
    }

    /// (category, count) pairs descending by count; ties keep
    /// first-encounter order (the sort is stable).
    pub fn most_common(&self) -> Vec<(ErrorCategory, usize)> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Write the CSV and chart artifacts under `output_dir`
    /// (created if absent). Returns the two paths, or None when
    /// there is nothing to report.
    pub fn write_artifacts(&self, output_dir: &Path) -> Result<Option<(PathBuf, PathBuf)>> {
        if self.is_empty() {
            tracing::info!("No misclassified samples to analyze — skipping artifacts");
            return Ok(None);
        }

        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Cannot create output directory '{}'", output_dir.display()))?;

        let csv_path = output_dir.join(CSV_FILE);
        self.write_csv(&csv_path)?;
        tracing::info!("Error distribution saved to '{}'", csv_path.display());

        let plot_path = output_dir.join(PLOT_FILE);
        self.render_chart(&plot_path)?;
        tracing::info!("Error distribution plot saved to '{}'", plot_path.display());

        Ok(Some((csv_path, plot_path)))
    }

    /// Write the two-column table, one row per present category.
    pub(crate) fn write_csv(&self, path: &Path) -> Result<()> {
        let mut f = File::create(path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;

        writeln!(f, "Error Type,Count")?;
        for (category, count) in self.most_common() {
            writeln!(f, "{category},{count}")?;
        }

        Ok(())
    }

    /// Render the bar chart: one bar per present category,
    /// x labels rotated so long category names stay readable.
    fn render_chart(&self, path: &Path) -> Result<()> {
        let ranked = self.most_common();
        let max_count = ranked.iter().map(|(_, n)| *n).max().unwrap_or(0);

        let root = SVGBackend::new(path, (800, 520)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Distribution of Sentiment Model Errors", ("sans-serif", 22))
            .margin(12)
            .x_label_area_size(120)
            .y_label_area_size(48)
            .build_cartesian_2d((0..ranked.len()).into_segmented(), 0..max_count + 1)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Error Type")
            .y_desc("Number of Misclassifications")
            .x_labels(ranked.len())
            .x_label_formatter(&|value| match value {
                SegmentValue::CenterOf(i) if *i < ranked.len() => ranked[*i].0.to_string(),
                _ => String::new(),
            })
            .x_label_style(
                ("sans-serif", 13)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(ranked.iter().enumerate().map(|(i, (_, count))| {
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0),
                        (SegmentValue::Exact(i + 1), *count),
                    ],
                    BLUE.mix(0.55).filled(),
                );
                bar.set_margin(0, 0, 6, 6);
                bar
            }))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
        Ok(())
    }
}

/// Plotters error types are generic over the backend and don't
/// convert to anyhow directly; flatten them to a message.
fn chart_err<E: Display>(e: E) -> anyhow::Error {
    anyhow::anyhow!("Chart rendering failed: {e}")
}
