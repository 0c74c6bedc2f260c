//! Output formatting module for CLI

pub mod json;
mod terminal;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

use crate::error::PaperlintError;
use crate::rules::DocumentReport;

/// What happened to one input path
#[derive(Debug, Clone)]
pub enum DocumentOutcome {
    /// The document was loaded and checked
    Checked(DocumentReport),
    /// The path could not be resolved or read
    Failed { path: String, error: String },
}

/// Everything a `check` run produced, in input order
#[derive(Debug, Clone, Default)]
pub struct CheckRun {
    pub outcomes: Vec<DocumentOutcome>,
}

impl CheckRun {
    pub fn new(outcomes: Vec<DocumentOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn reports(&self) -> impl Iterator<Item = &DocumentReport> {
        self.outcomes.iter().filter_map(|o| match o {
            DocumentOutcome::Checked(report) => Some(report),
            DocumentOutcome::Failed { .. } => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            DocumentOutcome::Failed { path, error } => Some((path.as_str(), error.as_str())),
            DocumentOutcome::Checked(_) => None,
        })
    }

    pub fn active_count(&self) -> usize {
        self.reports().map(|r| r.results.active_count()).sum()
    }

    pub fn suppressed_count(&self) -> usize {
        self.reports().map(|r| r.results.suppressed_count()).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Trait for rendering the results of a check run
pub trait ReportRenderer {
    fn render(&self, run: &CheckRun) -> Result<String, PaperlintError>;
}
