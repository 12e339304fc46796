// ============================================================
// Layer 4c — Report Layer
// ============================================================
// Renders the per-sample document artifact: one standalone A4
// PDF per explained misclassification, with a fixed layout
// (title, timestamp, prediction summary, wrapped review text,
// footer). The PDF primitives come from printpdf; everything
// above the drawing calls is plain layout arithmetic.

/// Per-sample PDF report generation
pub mod pdf;
