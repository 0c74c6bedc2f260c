//! Analysis context shared by all rules

use crate::document::{Document, EnvironmentTracker};

/// Everything a rule may look at: the document and its environment state.
///
/// The context is immutable once built and is only ever lent out as `&self`,
/// so rules can run concurrently against the same value.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    document: Document,
    environments: EnvironmentTracker,
}

impl AnalysisContext {
    /// Preprocess a document: track environments and keep both line views.
    pub fn new(document: Document) -> Self {
        let environments = EnvironmentTracker::build(&document);
        Self {
            document,
            environments,
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(Document::new(text))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn environments(&self) -> &EnvironmentTracker {
        &self.environments
    }

    /// Raw lines
    pub fn lines(&self) -> &[String] {
        self.document.lines()
    }

    /// Comment-stripped lines
    pub fn clean_lines(&self) -> &[String] {
        self.document.clean_lines()
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}
