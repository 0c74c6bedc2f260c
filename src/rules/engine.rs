//! Rules evaluation engine

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::{debug, info, span, Level};

use super::context::AnalysisContext;
use super::registry::{Registry, Rule};
use super::resolver::CategorySet;
use super::results::{CheckResults, Finding, ReportedFinding};
use crate::utils::timing::{RuleTiming, RunTiming, Timer};

/// Runs every registered rule and partitions the findings by the active set.
///
/// Inactive rules still run: their findings end up in the suppressed list so
/// the report can say how much was hidden.
pub struct RulesEngine<'r> {
    registry: &'r Registry,
    active: CategorySet,
    timings: bool,
}

impl<'r> RulesEngine<'r> {
    /// Create a new engine over `registry` with the resolved active set
    pub fn new(registry: &'r Registry, active: CategorySet) -> Self {
        Self {
            registry,
            active,
            timings: false,
        }
    }

    /// Record per-rule durations in the results
    pub fn with_timings(mut self, enabled: bool) -> Self {
        self.timings = enabled;
        self
    }

    pub fn active(&self) -> &CategorySet {
        &self.active
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// Run all rules against one document
    pub fn run(&self, ctx: &AnalysisContext) -> CheckResults {
        let span = span!(Level::DEBUG, "check", lines = ctx.document().len());
        let _guard = span.enter();

        let total = Timer::start();
        let outcomes: Vec<(&Rule, Vec<Finding>, RuleTiming)> = self
            .registry
            .rules()
            .par_iter()
            .map(|rule| {
                let timer = Timer::start();
                let findings = dedup(rule.check(ctx));
                let timing = RuleTiming::new(rule.name, findings.len(), timer.elapsed());
                (rule, findings, timing)
            })
            .collect();

        let mut results = CheckResults::new();
        let mut timings = Vec::with_capacity(outcomes.len());

        for (rule, findings, timing) in outcomes {
            let active = self.active.contains(rule.name);
            debug!(
                rule = rule.name,
                findings_count = findings.len(),
                active,
                "Rule completed"
            );

            for finding in findings {
                if let Some(line) = finding.line {
                    if ctx.document().is_comment_line(line) {
                        continue;
                    }
                }
                let reported = ReportedFinding::new(rule, finding);
                if active {
                    results.push_active(reported);
                } else {
                    results.push_suppressed(reported);
                }
            }
            timings.push(timing);
        }

        results.sort();
        if self.timings {
            results.set_timing(RunTiming::new(timings, total.elapsed()));
        }

        info!(
            "Check complete: {} active, {} suppressed",
            results.active_count(),
            results.suppressed_count()
        );

        results
    }
}

/// Drop exact repeats, keeping the first occurrence.
fn dedup(findings: Vec<Finding>) -> Vec<Finding> {
    let mut seen = HashSet::with_capacity(findings.len());
    findings
        .into_iter()
        .filter(|f| seen.insert(f.clone()))
        .collect()
}
