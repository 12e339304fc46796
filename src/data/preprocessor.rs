// ============================================================
// Layer 4 — Review Text Preprocessor
// ============================================================
// Cleans raw review text before tokenisation.
//
// Why do we need to clean text?
//   Scraped movie reviews often contain:
//   - Inline HTML markup, above all "<br />" line breaks
//   - Non-breaking spaces (U+00A0) from web formatting
//   - Carriage returns (\r) from Windows line endings
//   - Tab characters and runs of multiple spaces
//   - Control characters from copy-pasting
//
// If we don't clean these, the tokenizer treats them as
// meaningful tokens and wastes vocabulary space on markup.
//
// Cleaning steps (applied in order):
//   1. Drop anything between '<' and '>' (HTML tags → space)
//   2. Replace Unicode whitespace variants with plain space
//   3. Remove invisible control characters
//   4. Collapse runs of spaces into one
//   5. Trim leading/trailing whitespace
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw review for downstream tokenisation.
    /// Takes a &str and returns an owned String.
    pub fn clean(&self, text: &str) -> String {
        // ── Step 1: Strip HTML tags ───────────────────────────────────────────
        // A small scanner is enough here: reviews carry simple
        // inline tags like <br /> or <i>, never nested markup
        // with '>' inside attribute values.
        let mut untagged = String::with_capacity(text.len());
        let mut in_tag = false;

        for c in text.chars() {
            match c {
                '<' => {
                    in_tag = true;
                    // A tag acts as a word separator, not as glue
                    untagged.push(' ');
                }
                '>' if in_tag => in_tag = false,
                _ if in_tag => {}
                c => untagged.push(c),
            }
        }

        // ── Step 2: Normalise individual characters ───────────────────────────
        // Map problematic Unicode characters to plain spaces.
        let normalised: String = untagged
            .chars()
            .map(|c| match c {
                '\t' => ' ',
                // Non-breaking space → regular space
                '\u{00A0}' => ' ',
                // Zero-width space → regular space
                '\u{200B}' => ' ',
                // Byte order mark → space
                '\u{FEFF}' => ' ',
                '\r' | '\n' => ' ',
                // Any other control character → space
                c if c.is_control() => ' ',
                c => c,
            })
            .collect();

        // ── Step 3: Collapse runs of spaces ───────────────────────────────────
        let mut out = String::with_capacity(normalised.len());
        let mut last_space = false;

        for c in normalised.chars() {
            if c == ' ' {
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.push(c);
                last_space = false;
            }
        }

        out.trim().to_string()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_br_tags() {
        let p = Preprocessor::new();
        assert_eq!(
            p.clean("great first act.<br /><br />terrible ending"),
            "great first act. terrible ending"
        );
    }

    #[test]
    fn test_strips_inline_tags() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("a <i>very</i> slow film"), "a very slow film");
    }

    #[test]
    fn test_collapses_multiple_spaces() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("hello   world"), "hello world");
    }

    #[test]
    fn test_newlines_become_spaces() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("line one\r\nline two"), "line one line two");
    }

    #[test]
    fn test_removes_control_chars() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("hello\x01world"), "hello world");
    }

    #[test]
    fn test_trims_edges() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("  hello world  "), "hello world");
    }

    #[test]
    fn test_empty_string() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(""), "");
    }
}
