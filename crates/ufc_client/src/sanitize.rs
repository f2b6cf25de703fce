//! Whitespace clean-up for scraped text.
//!
//! Event pages pad their text with indentation and line breaks. The
//! replacements run in a fixed order and each is non-overlapping, left to
//! right, so the output is stable for a given input.

/// Collapse 3-space runs to one space, drop 2-space runs, strip newlines.
pub fn sanitize(raw: &str) -> String {
    raw.replace("   ", " ").replace("  ", "").replace('\n', "")
}

/// Like [`sanitize`] but keeps word boundaries: newlines become spaces and
/// 4-, 3- and 2-space runs each collapse to one space.
pub fn sanitize_title(raw: &str) -> String {
    raw.replace('\n', " ")
        .replace("    ", " ")
        .replace("   ", " ")
        .replace("  ", " ")
}
