// ============================================================
// Layer 4c — PDF Report Generator
// ============================================================
// Generates a standalone PDF report for a single
// misclassification. Fixed layout, top to bottom:
//
//   Title (Helvetica-Bold 15)
//   "Generated on: ..." timestamp (Helvetica 10)
//   Prediction Summary block — true label, predicted label,
//     confidence mapping, error category (Helvetica 10)
//   Review Text — wrapped at 95 characters (Helvetica 9),
//     paginating onto fresh pages whenever the cursor passes
//     the bottom margin
//   Footer caption (Helvetica-Oblique 8)
//
// Labels render as POSITIVE/NEGATIVE names, never raw 0/1.
// Output: <output_dir>/error_report_<index>.pdf — regenerating
// the same index overwrites the previous file.
//
// The builtin Helvetica faces are PDF base-14 fonts, so no font
// files are needed at runtime.

use anyhow::{Context, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use crate::domain::misclassification::MisclassificationEntry;

/// Maximum characters per body line.
pub const WRAP_WIDTH: usize = 95;

// A4 geometry, in millimetres
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 14.0;

// Vertical steps (the cursor moves top to bottom)
const TITLE_GAP: f32 = 10.5;
const SECTION_GAP: f32 = 6.3;
const META_LINE_HEIGHT: f32 = 4.9;
const BODY_LINE_HEIGHT: f32 = 4.2;
const FOOTER_GAP: f32 = 7.0;

/// The deterministic file name for a report index.
pub fn report_file_name(index: usize) -> String {
    format!("error_report_{index}.pdf")
}

/// Renders one PDF per misclassification entry into a fixed
/// output directory.
pub struct PdfReporter {
    output_dir: PathBuf,
}

impl PdfReporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Render the report for one entry. Returns the file path;
    /// a second call with the same entry id overwrites the file.
    pub fn generate(&self, entry: &MisclassificationEntry) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Cannot create reports directory '{}'",
                self.output_dir.display()
            )
        })?;

        let path = self.output_dir.join(report_file_name(entry.id));

        let (doc, page1, layer1) = PdfDocument::new(
            "Sentiment Error Analysis Report",
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Layer 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .context("Cannot load builtin font")?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .context("Cannot load builtin font")?;
        let oblique = doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .context("Cannot load builtin font")?;

        let mut layer = doc.get_page(page1).get_layer(layer1);
        let mut y = PAGE_HEIGHT - MARGIN;

        // ── Title ─────────────────────────────────────────────────────────────
        layer.use_text(
            "Transformer Sentiment Error Analysis Report",
            15.0,
            Mm(MARGIN),
            Mm(y),
            &bold,
        );

        y -= TITLE_GAP;
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        layer.use_text(
            format!("Generated on: {timestamp}"),
            10.0,
            Mm(MARGIN),
            Mm(y),
            &regular,
        );

        // ── Prediction summary ────────────────────────────────────────────────
        y -= TITLE_GAP;
        layer.use_text("Prediction Summary", 11.0, Mm(MARGIN), Mm(y), &bold);

        y -= SECTION_GAP;
        layer.use_text(
            format!("True Label      : {}", entry.true_label.name()),
            10.0,
            Mm(MARGIN),
            Mm(y),
            &regular,
        );
        y -= META_LINE_HEIGHT;
        layer.use_text(
            format!("Predicted Label : {}", entry.pred_label.name()),
            10.0,
            Mm(MARGIN),
            Mm(y),
            &regular,
        );
        y -= META_LINE_HEIGHT;
        layer.use_text(
            format!("Confidence      : {}", entry.confidence),
            10.0,
            Mm(MARGIN),
            Mm(y),
            &regular,
        );
        y -= META_LINE_HEIGHT;
        layer.use_text(
            format!("Error Category  : {}", entry.error_type),
            10.0,
            Mm(MARGIN),
            Mm(y),
            &regular,
        );

        // ── Review text ───────────────────────────────────────────────────────
        y -= TITLE_GAP;
        layer.use_text("Review Text", 11.0, Mm(MARGIN), Mm(y), &bold);

        y -= SECTION_GAP;
        for line in wrap_text(&entry.text, WRAP_WIDTH) {
            // Page break: fresh page, cursor back to the top
            if y < MARGIN {
                let (page, layer_idx) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
                layer = doc.get_page(page).get_layer(layer_idx);
                y = PAGE_HEIGHT - MARGIN;
            }
            layer.use_text(line, 9.0, Mm(MARGIN), Mm(y), &regular);
            y -= BODY_LINE_HEIGHT;
        }

        // ── Footer ────────────────────────────────────────────────────────────
        y -= FOOTER_GAP;
        layer.use_text(
            "This report explains why the model made an incorrect prediction using explainable AI techniques.",
            8.0,
            Mm(MARGIN),
            Mm(y),
            &oblique,
        );

        let file = File::create(&path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;
        doc.save(&mut BufWriter::new(file))
            .with_context(|| format!("Cannot write '{}'", path.display()))?;

        Ok(path)
    }
}

/// Greedy word wrap to at most `width` characters per line.
/// Words longer than a full line are split into width-sized
/// chunks so no line can ever exceed the cap.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word = word;
        let mut word_len = word.chars().count();

        // Break oversized words into full-width chunks first
        while word_len > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let split_at = word
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            lines.push(word[..split_at].to_string());
            word = &word[split_at..];
            word_len = word.chars().count();
        }
        if word_len == 0 {
            continue;
        }

        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if current_len > 0 {
        lines.push(current);
    }

    lines
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::misclassification::ErrorCategory;
    use crate::domain::prediction::Confidence;
    use crate::domain::sample::Label;

    fn entry(id: usize, text: &str) -> MisclassificationEntry {
        MisclassificationEntry {
            id,
            text: text.to_string(),
            true_label: Label::Positive,
            pred_label: Label::Negative,
            confidence: Confidence::new(0.12, 0.88),
            error_type: ErrorCategory::ContrastError,
        }
    }

    #[test]
    fn test_wrap_never_exceeds_width() {
        let text = "word ".repeat(400);
        for line in wrap_text(&text, WRAP_WIDTH) {
            assert!(line.chars().count() <= WRAP_WIDTH);
        }
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        assert_eq!(wrap_text("a short review", 95), vec!["a short review"]);
    }

    #[test]
    fn test_wrap_splits_oversized_words() {
        let text = "x".repeat(250);
        let lines = wrap_text(&text, 95);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 95);
        assert_eq!(lines[2].len(), 60);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap_text("", 95).is_empty());
        assert!(wrap_text("   ", 95).is_empty());
    }

    #[test]
    fn test_generate_writes_one_pdf_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = PdfReporter::new(dir.path());

        let path = reporter.generate(&entry(1, "good but boring")).unwrap();
        assert_eq!(path, dir.path().join("error_report_1.pdf"));
        assert!(path.exists());
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_generate_overwrites_same_index() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = PdfReporter::new(dir.path());

        let first = reporter.generate(&entry(2, "short")).unwrap();
        let second = reporter
            .generate(&entry(2, &"much longer review text ".repeat(50)))
            .unwrap();
        assert_eq!(first, second);
        assert!(second.exists());
    }

    #[test]
    fn test_generate_paginates_long_reviews() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = PdfReporter::new(dir.path());

        // Enough text for several pages of 9pt lines
        let long = "an unusually wordy review sentence that keeps going ".repeat(400);
        let path = reporter.generate(&entry(3, &long)).unwrap();
        assert!(path.exists());
    }
}
