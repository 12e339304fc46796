// ============================================================
// Layer 2 — ViewUseCase (Interactive Viewer)
// ============================================================
// Read-only browser over the exported metadata index:
//
//   1. Load misclassified_meta.json (absent → tell the user to
//      run 'analyze' first and stop — not a crash)
//   2. Pick an error-type filter: ALL or one category present
//   3. Pick a sample id within the filtered set
//   4. Show text, labels, category, confidence mapping, and
//      whether the PDF report exists on disk
//
// The viewer never writes anything — the index and the report
// files stay exactly as the pipeline left them.
//
// Prompt loop built on dialoguer's Select, the same pattern as
// any terminal picker: items, default index, interact().

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};
use std::path::Path;

use crate::domain::misclassification::{ErrorCategory, MetaEntry};
use crate::infra::meta_store::MetaStore;

pub struct ViewUseCase {
    analysis_dir: String,
}

impl ViewUseCase {
    pub fn new(analysis_dir: String) -> Self {
        Self { analysis_dir }
    }

    pub fn execute(&self) -> Result<()> {
        let store = MetaStore::new(&self.analysis_dir);

        // Missing or unreadable index is a terminal state with a
        // remedial message, not a crash
        let entries = match store.load() {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!("{e:#}");
                return Ok(());
            }
        };

        if entries.is_empty() {
            println!("No misclassified samples recorded — nothing to browse.");
            return Ok(());
        }

        println!("Explainable Sentiment Error Analysis");
        println!("Explore why the sentiment model made incorrect predictions.\n");

        let theme = ColorfulTheme::default();

        loop {
            // ── Error-type filter ─────────────────────────────────────────────
            let categories = distinct_categories(&entries);
            let mut filter_items: Vec<String> = vec!["ALL".to_string()];
            filter_items.extend(categories.iter().map(|c| c.to_string()));
            filter_items.push("Quit".to_string());

            let choice = Select::with_theme(&theme)
                .with_prompt("Filter by error type")
                .items(&filter_items)
                .default(0)
                .interact()?;

            if choice == filter_items.len() - 1 {
                break;
            }
            let selected = if choice == 0 {
                None
            } else {
                Some(categories[choice - 1])
            };

            let filtered = filter_by_category(&entries, selected);
            println!("Showing {} misclassified samples", filtered.len());

            // ── Sample selection ──────────────────────────────────────────────
            let sample_items: Vec<String> = filtered
                .iter()
                .map(|e| format!("#{} [{}] {}", e.id, e.error_type, preview(&e.text)))
                .collect();

            let pick = Select::with_theme(&theme)
                .with_prompt("Select sample ID")
                .items(&sample_items)
                .default(0)
                .interact()?;

            display_entry(filtered[pick]);
        }

        Ok(())
    }
}

/// The distinct categories present in the index, sorted by name.
pub fn distinct_categories(entries: &[MetaEntry]) -> Vec<ErrorCategory> {
    let mut categories: Vec<ErrorCategory> = Vec::new();
    for entry in entries {
        if !categories.contains(&entry.error_type) {
            categories.push(entry.error_type);
        }
    }
    categories.sort_by_key(|c| c.as_str());
    categories
}

/// Exact-match filter on error_type; None is the ALL wildcard.
pub fn filter_by_category(
    entries: &[MetaEntry],
    category: Option<ErrorCategory>,
) -> Vec<&MetaEntry> {
    entries
        .iter()
        .filter(|e| category.map_or(true, |c| e.error_type == c))
        .collect()
}

/// First few words of a review for the selection list.
fn preview(text: &str) -> String {
    const PREVIEW_CHARS: usize = 40;
    if text.chars().count() <= PREVIEW_CHARS {
        text.to_string()
    } else {
        let cut: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    }
}

/// Full read-only detail view of one sample.
fn display_entry(entry: &MetaEntry) {
    println!("\n---------- Review Text ----------");
    println!("{}", entry.text);

    println!("\nTrue Label      : {}", entry.true_label.name());
    println!("Predicted Label : {}", entry.pred_label.name());
    println!("Error Type      : {}", entry.error_type);

    println!("\nModel Confidence:");
    match serde_json::to_string_pretty(&entry.confidence) {
        Ok(json) => println!("{json}"),
        Err(_) => println!("{}", entry.confidence),
    }

    if Path::new(&entry.document_path).exists() {
        println!("\nPDF report available: {}", entry.document_path);
    } else {
        println!("\nPDF report not found (run 'analyze' again if needed)");
    }
    println!();
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::Confidence;
    use crate::domain::sample::Label;

    fn meta(id: usize, category: ErrorCategory) -> MetaEntry {
        MetaEntry {
            id,
            text: format!("review {id}"),
            true_label: Label::Negative,
            pred_label: Label::Positive,
            confidence: Confidence::new(0.7, 0.3),
            error_type: category,
            document_path: format!("reports/error_report_{id}.pdf"),
        }
    }

    #[test]
    fn test_distinct_categories_sorted_and_deduped() {
        let entries = vec![
            meta(1, ErrorCategory::NegationError),
            meta(2, ErrorCategory::ContrastError),
            meta(3, ErrorCategory::NegationError),
        ];
        assert_eq!(
            distinct_categories(&entries),
            vec![
                ErrorCategory::ContrastError,
                ErrorCategory::NegationError,
            ]
        );
    }

    #[test]
    fn test_filter_is_exact_match() {
        let entries = vec![
            meta(1, ErrorCategory::NegationError),
            meta(2, ErrorCategory::ContrastError),
            meta(3, ErrorCategory::NegationError),
        ];
        let filtered = filter_by_category(&entries, Some(ErrorCategory::NegationError));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|e| e.error_type == ErrorCategory::NegationError));
    }

    #[test]
    fn test_filter_all_wildcard() {
        let entries = vec![
            meta(1, ErrorCategory::NegationError),
            meta(2, ErrorCategory::ContrastError),
        ];
        assert_eq!(filter_by_category(&entries, None).len(), 2);
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let long = "x".repeat(100);
        let p = preview(&long);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), 43);
        assert_eq!(preview("short"), "short");
    }
}
