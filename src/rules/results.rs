//! # Check Results Structures
//!
//! This module defines the data structures for representing findings and
//! the outcome of checking one document.
//!
//! ## Overview
//!
//! - [`Span`] - byte range inside a raw line, used for underlining
//! - [`Finding`] - one issue produced by a rule
//! - [`ReportedFinding`] - a finding tagged with the rule that produced it
//! - [`CheckResults`] - active and suppressed findings of one document
//! - [`DocumentReport`] - results together with the document path
//!
//! ## Examples
//!
//! ```rust
//! use paperlint::rules::Finding;
//!
//! let finding = Finding::new(3, "No space before \\cite").with_span(10, 16);
//! assert_eq!(finding.line, Some(3));
//!
//! let global = Finding::document("Label fig:x is not referenced");
//! assert!(global.line.is_none());
//! ```

use std::ops::Range;

use serde::Serialize;

use super::category::Category;
use super::registry::Rule;
use crate::utils::timing::RunTiming;

/// Half-open byte range `[start, end)` inside a raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// A single issue reported by a rule.
///
/// `line` is `None` for document-wide findings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Finding {
    /// 0-based line index
    pub line: Option<usize>,

    /// Human-readable message
    pub message: String,

    /// Optional underline range within the raw line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Finding {
    /// Create a finding tied to a line
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            message: message.into(),
            span: None,
        }
    }

    /// Create a document-wide finding
    pub fn document(message: impl Into<String>) -> Self {
        Self {
            line: None,
            message: message.into(),
            span: None,
        }
    }

    /// Set the underline range
    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.span = Some(Span { start, end });
        self
    }

    /// Set the underline range from a regex match or any byte range
    pub fn with_range(mut self, range: Range<usize>) -> Self {
        self.span = Some(range.into());
        self
    }
}

/// A finding tagged with its originating rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedFinding {
    /// Name of the rule, as used by `-i`/`-x`
    pub rule: &'static str,

    /// Category mask of the rule
    pub category: Category,

    #[serde(flatten)]
    pub finding: Finding,
}

impl ReportedFinding {
    pub fn new(rule: &Rule, finding: Finding) -> Self {
        Self {
            rule: rule.name,
            category: rule.category,
            finding,
        }
    }

    pub fn line(&self) -> Option<usize> {
        self.finding.line
    }
}

/// Outcome of running the engine on one document.
///
/// Findings of rules in the active set are `active`; findings of every other
/// rule are computed anyway and kept in `suppressed` so the caller can tell
/// how much the switches hid. Both lists are sorted by line, document-wide
/// findings first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckResults {
    active: Vec<ReportedFinding>,
    suppressed: Vec<ReportedFinding>,

    #[serde(skip)]
    timing: Option<RunTiming>,
}

impl CheckResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_active(&mut self, finding: ReportedFinding) {
        self.active.push(finding);
    }

    pub(crate) fn push_suppressed(&mut self, finding: ReportedFinding) {
        self.suppressed.push(finding);
    }

    pub(crate) fn set_timing(&mut self, timing: RunTiming) {
        self.timing = Some(timing);
    }

    /// Stable sort of both lists by line; `None` orders before every line.
    pub(crate) fn sort(&mut self) {
        self.active.sort_by_key(ReportedFinding::line);
        self.suppressed.sort_by_key(ReportedFinding::line);
    }

    /// Findings that are reported
    pub fn active(&self) -> &[ReportedFinding] {
        &self.active
    }

    /// Findings computed but withheld by the active switches
    pub fn suppressed(&self) -> &[ReportedFinding] {
        &self.suppressed
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn suppressed_count(&self) -> usize {
        self.suppressed.len()
    }

    /// Per-rule timing, when the engine was asked to record it
    pub fn timing(&self) -> Option<&RunTiming> {
        self.timing.as_ref()
    }

    /// Active findings produced by one rule
    pub fn active_by_rule<'a>(
        &'a self,
        rule: &'a str,
    ) -> impl Iterator<Item = &'a ReportedFinding> {
        self.active.iter().filter(move |f| f.rule == rule)
    }

    /// Active findings whose rule shares a bit with `category`
    pub fn active_by_category(
        &self,
        category: Category,
    ) -> impl Iterator<Item = &ReportedFinding> {
        self.active
            .iter()
            .filter(move |f| f.category.intersects(category))
    }

    /// Check if nothing is reported
    pub fn is_clean(&self) -> bool {
        self.active.is_empty()
    }
}

/// Results of one document, as handed to the renderers.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    /// Path as given or discovered
    pub path: String,

    /// Raw lines, kept for excerpts
    #[serde(skip)]
    pub lines: Vec<String>,

    #[serde(flatten)]
    pub results: CheckResults,
}

impl DocumentReport {
    pub fn new(path: impl Into<String>, lines: Vec<String>, results: CheckResults) -> Self {
        Self {
            path: path.into(),
            lines,
            results,
        }
    }

    /// Raw text of a reported line, if it exists
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }
}
