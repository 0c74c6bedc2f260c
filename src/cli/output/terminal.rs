//! Terminal output formatting with colors

use colored::Colorize;

use super::{CheckRun, DocumentOutcome, ReportRenderer};
use crate::error::PaperlintError;
use crate::rules::{DocumentReport, ReportedFinding};

/// Indentation of excerpts and underlines
const EXCERPT_INDENT: &str = "    ";

/// Rules listed per document with `--timings`
const SLOWEST_RULES: usize = 5;

pub struct TerminalOutput {
    timings: bool,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self { timings: false }
    }

    /// Append the slowest rules after every document
    pub fn with_timings(mut self, enabled: bool) -> Self {
        self.timings = enabled;
        self
    }

    fn format_document(&self, report: &DocumentReport) -> String {
        let mut output = format!("Inspecting file '{}'\n", report.path.blue());

        for (i, finding) in report.results.active().iter().enumerate() {
            output.push_str(&self.format_finding(i + 1, finding, report));
        }

        if self.timings {
            if let Some(timing) = report.results.timing() {
                let slowest: Vec<String> = timing
                    .slowest(SLOWEST_RULES)
                    .iter()
                    .map(|t| format!("{} {}", t.name, t.duration_formatted()))
                    .collect();
                output.push_str(&format!(
                    "{}\n",
                    format!(
                        "  Checked in {} (slowest: {})",
                        timing.total_formatted(),
                        slowest.join(", ")
                    )
                    .dimmed()
                ));
            }
        }

        output
    }

    fn format_finding(
        &self,
        number: usize,
        finding: &ReportedFinding,
        report: &DocumentReport,
    ) -> String {
        let header = format!("Warning {}:", number).yellow().bold();
        let rule = format!("[{}]", finding.rule).dimmed();

        let Some(line) = finding.line() else {
            return format!("{} {}  {}\n", header, finding.finding.message, rule);
        };

        let mut output = format!(
            "{} Line {}: {}  {}\n",
            header,
            line + 1,
            finding.finding.message,
            rule
        );

        if let (Some(span), Some(raw)) = (finding.finding.span, report.line(line)) {
            output.push_str(&excerpt(raw, span.start, span.end));
        }

        output
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for TerminalOutput {
    fn render(&self, run: &CheckRun) -> Result<String, PaperlintError> {
        let mut output = String::new();

        for outcome in &run.outcomes {
            match outcome {
                DocumentOutcome::Checked(report) => {
                    output.push_str(&self.format_document(report));
                }
                DocumentOutcome::Failed { path, error } => {
                    output.push_str(&format!(
                        "Inspecting file '{}'\n{} {}\n",
                        path.blue(),
                        "Error:".red().bold(),
                        error
                    ));
                }
            }
        }

        output.push_str(&format!(
            "\n{} warnings printed; {} suppressed warnings\n",
            run.active_count().to_string().bold(),
            run.suppressed_count()
        ));

        Ok(output)
    }
}

/// The raw line and a caret underline of the byte range `start..end`.
///
/// Tabs print as single spaces so that char columns stay aligned.
fn excerpt(raw: &str, start: usize, end: usize) -> String {
    let start_col = column(raw, start);
    let end_col = column(raw, end.min(raw.len()));
    let width = end_col.saturating_sub(start_col).max(1);

    format!(
        "{indent}{}\n{indent}{}{}\n",
        raw.replace('\t', " "),
        " ".repeat(start_col),
        "^".repeat(width).yellow(),
        indent = EXCERPT_INDENT
    )
}

/// Char column of a byte offset
fn column(line: &str, byte: usize) -> usize {
    line.char_indices().take_while(|(i, _)| *i < byte).count()
}
