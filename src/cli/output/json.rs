//! JSON output formatting
//!
//! Lines in findings are 0-based indices into the document.

use serde::Serialize;

use super::{CheckRun, DocumentOutcome, ReportRenderer};
use crate::error::PaperlintError;
use crate::rules::DocumentReport;

pub struct JsonOutput {
    timings: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { timings: false }
    }

    /// Include per-rule timings for every document
    pub fn with_timings(mut self, enabled: bool) -> Self {
        self.timings = enabled;
        self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct RunOutput<'a> {
    version: &'static str,
    active_count: usize,
    suppressed_count: usize,
    documents: Vec<DocumentOutput<'a>>,
    errors: Vec<ErrorOutput<'a>>,
}

#[derive(Serialize)]
struct DocumentOutput<'a> {
    #[serde(flatten)]
    report: &'a DocumentReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    timings: Option<Vec<TimingOutput>>,
}

#[derive(Serialize)]
struct TimingOutput {
    rule: &'static str,
    findings: usize,
    duration_ms: f64,
}

#[derive(Serialize)]
struct ErrorOutput<'a> {
    path: &'a str,
    error: &'a str,
}

impl JsonOutput {
    fn document<'a>(&self, report: &'a DocumentReport) -> DocumentOutput<'a> {
        let timings = report.results.timing().filter(|_| self.timings).map(|run| {
            run.rules
                .iter()
                .map(|t| TimingOutput {
                    rule: t.name,
                    findings: t.findings_count,
                    duration_ms: t.duration.as_secs_f64() * 1000.0,
                })
                .collect()
        });
        DocumentOutput { report, timings }
    }
}

impl ReportRenderer for JsonOutput {
    fn render(&self, run: &CheckRun) -> Result<String, PaperlintError> {
        let output = RunOutput {
            version: env!("CARGO_PKG_VERSION"),
            active_count: run.active_count(),
            suppressed_count: run.suppressed_count(),
            documents: run
                .outcomes
                .iter()
                .filter_map(|o| match o {
                    DocumentOutcome::Checked(report) => Some(self.document(report)),
                    DocumentOutcome::Failed { .. } => None,
                })
                .collect(),
            errors: run
                .failures()
                .map(|(path, error)| ErrorOutput { path, error })
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}
