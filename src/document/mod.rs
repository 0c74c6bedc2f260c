//! # Document Module
//!
//! Holds one loaded document as raw lines plus a parallel comment-stripped
//! view, and derives the per-line environment membership from it.
//!
//! - [`Document`] - raw and clean lines, immutable once built
//! - [`EnvironmentTracker`] - membership vectors and spans per environment
//!
//! ## Examples
//!
//! ```rust
//! use paperlint::document::{Document, EnvironmentTracker};
//!
//! let doc = Document::new("\\begin{figure}\ntext % note\n\\end{figure}");
//! assert_eq!(doc.clean_line(1), "text ");
//!
//! let envs = EnvironmentTracker::build(&doc);
//! assert_eq!(envs.membership("figure"), Some(&[true, true, false][..]));
//! ```

mod environments;

pub use environments::{EnvironmentTracker, RegionSpan};

use std::path::Path;

use crate::error::ScanError;

/// Comment marker of the markup language.
pub const COMMENT_MARKER: char = '%';

/// Escape character that turns the comment marker into a literal.
pub const ESCAPE: char = '\\';

/// A document split into lines.
///
/// Line indices are 0-based everywhere in the crate; renderers add 1.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    lines: Vec<String>,
    clean: Vec<String>,
}

impl Document {
    /// Build a document from its full text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let clean = lines.iter().map(|l| strip_comment(l).to_string()).collect();

        Self { text, lines, clean }
    }

    /// Read a document from disk.
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let text = std::fs::read_to_string(path).map_err(|e| ScanError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(Self::new(text))
    }

    /// Full text as loaded
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false: even an empty text has one (empty) line.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Raw line `i`
    pub fn line(&self, i: usize) -> &str {
        &self.lines[i]
    }

    /// Comment-stripped line `i`
    pub fn clean_line(&self, i: usize) -> &str {
        &self.clean[i]
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn clean_lines(&self) -> &[String] {
        &self.clean
    }

    /// Whether line `i` has been commented out by the author.
    pub fn is_comment_line(&self, i: usize) -> bool {
        self.lines
            .get(i)
            .map(|l| l.trim_start().starts_with(COMMENT_MARKER))
            .unwrap_or(false)
    }
}

/// Truncate a line at its first unescaped comment marker.
///
/// The result is always a prefix of `line`, or empty when nothing but
/// whitespace precedes the marker.
pub fn strip_comment(line: &str) -> &str {
    let mut previous = None;
    for (idx, ch) in line.char_indices() {
        if ch == COMMENT_MARKER && previous != Some(ESCAPE) {
            let kept = &line[..idx];
            return if kept.trim().is_empty() { "" } else { kept };
        }
        previous = Some(ch);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comment_plain_line() {
        assert_eq!(strip_comment("no comment here"), "no comment here");
    }

    #[test]
    fn test_strip_comment_trailing() {
        assert_eq!(strip_comment("text % remark"), "text ");
    }

    #[test]
    fn test_strip_comment_full_line() {
        assert_eq!(strip_comment("% whole line"), "");
        assert_eq!(strip_comment("    % indented"), "");
    }

    #[test]
    fn test_strip_comment_escaped_marker() {
        assert_eq!(strip_comment("50\\% of cases"), "50\\% of cases");
        assert_eq!(strip_comment("50\\% of cases % real"), "50\\% of cases ");
    }

    #[test]
    fn test_clean_line_is_prefix() {
        let doc = Document::new("a % b\n\\% c\n%d\nplain");
        for i in 0..doc.len() {
            assert!(doc.line(i).starts_with(doc.clean_line(i)));
        }
    }

    #[test]
    fn test_document_line_count() {
        assert_eq!(Document::new("").len(), 1);
        assert_eq!(Document::new("a\nb\n").len(), 3);
    }

    #[test]
    fn test_is_comment_line() {
        let doc = Document::new("text\n   % hidden\n");
        assert!(!doc.is_comment_line(0));
        assert!(doc.is_comment_line(1));
        assert!(!doc.is_comment_line(2));
        assert!(!doc.is_comment_line(99));
    }
}
