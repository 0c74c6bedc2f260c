//! Environment tracking
//!
//! For every environment name that is opened somewhere in a document, the
//! tracker records a per-line membership vector and the closed spans of each
//! occurrence. Membership is a flat flag: a begin line sets it, an end line
//! clears it, any other line keeps the value of the line above. Spans pair
//! each end with the innermost pending begin. Malformed input never fails: an unmatched `\end` produces a
//! span without a start, an unmatched `\begin` leaves the environment open
//! until the last line.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::Document;

/// Environments that behave as floats.
pub const FLOAT_ENVIRONMENTS: &[&str] = &["figure", "table", "listing"];

/// Verbatim code environment.
pub const CODE_ENVIRONMENT: &str = "lstlisting";

/// Equation and theorem-like environments.
pub const MATH_ENVIRONMENTS: &[&str] = &[
    "equation",
    "align",
    "eqnarray",
    "theorem",
    "proof",
    "proposition",
];

lazy_static! {
    static ref BEGIN: Regex = Regex::new(r"\\begin\{(\w+)\*?\}").unwrap();
    static ref MARKER: Regex = Regex::new(r"\\(begin|end)\{(\w+)\*?\}").unwrap();
}

/// One closed occurrence of an environment.
///
/// `start` is `None` when the `\end` marker had no open `\begin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionSpan {
    pub start: Option<usize>,
    pub end: usize,
}

impl RegionSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: Some(start),
            end,
        }
    }

    /// Lines from the `\begin` line up to, excluding, the `\end` line.
    pub fn body(&self) -> Option<Range<usize>> {
        self.start.map(|start| start..self.end)
    }
}

#[derive(Debug, Clone, Default)]
struct Region {
    membership: Vec<bool>,
    spans: Vec<RegionSpan>,
    pending: Vec<usize>,
}

/// Per-document environment state, derived once from a [`Document`].
#[derive(Debug, Clone, Default)]
pub struct EnvironmentTracker {
    regions: BTreeMap<String, Region>,
    line_count: usize,
}

impl EnvironmentTracker {
    /// Scan a document in a single pass over its lines.
    pub fn build(document: &Document) -> Self {
        let names: BTreeSet<&str> = BEGIN
            .captures_iter(document.text())
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();

        let mut regions: BTreeMap<String, Region> = names
            .into_iter()
            .map(|name| {
                let region = Region {
                    membership: Vec::with_capacity(document.len()),
                    ..Region::default()
                };
                (name.to_string(), region)
            })
            .collect();

        for (i, line) in document.lines().iter().enumerate() {
            let mut begun: HashSet<&str> = HashSet::new();
            let mut ended: HashSet<&str> = HashSet::new();

            for cap in MARKER.captures_iter(line) {
                let (Some(kind), Some(name)) = (cap.get(1), cap.get(2)) else {
                    continue;
                };
                let name = name.as_str();
                let Some(region) = regions.get_mut(name) else {
                    continue;
                };

                if kind.as_str() == "begin" {
                    region.pending.push(i);
                    begun.insert(name);
                } else {
                    let start = region.pending.pop();
                    region.spans.push(RegionSpan { start, end: i });
                    ended.insert(name);
                }
            }

            for (name, region) in regions.iter_mut() {
                let inside = if begun.contains(name.as_str()) {
                    true
                } else if ended.contains(name.as_str()) {
                    false
                } else {
                    region.membership.last().copied().unwrap_or(false)
                };
                region.membership.push(inside);
            }
        }

        tracing::trace!(
            environments = regions.len(),
            lines = document.len(),
            "Environment tracking complete"
        );

        Self {
            regions,
            line_count: document.len(),
        }
    }

    /// Number of lines of the tracked document
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Discovered environment names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.regions.contains_key(name)
    }

    /// Membership vector of `name`, one entry per line
    pub fn membership(&self, name: &str) -> Option<&[bool]> {
        self.regions.get(name).map(|r| r.membership.as_slice())
    }

    /// Closed spans of `name` in the order their `\end` lines appear
    pub fn spans(&self, name: &str) -> &[RegionSpan] {
        self.regions
            .get(name)
            .map(|r| r.spans.as_slice())
            .unwrap_or(&[])
    }

    /// Whether line `line` is inside an open `name` environment.
    pub fn is_inside(&self, name: &str, line: usize) -> bool {
        self.regions
            .get(name)
            .and_then(|r| r.membership.get(line))
            .copied()
            .unwrap_or(false)
    }

    pub fn in_any_environment(&self, line: usize) -> bool {
        self.regions
            .values()
            .any(|r| r.membership.get(line).copied().unwrap_or(false))
    }

    pub fn in_float(&self, line: usize) -> bool {
        FLOAT_ENVIRONMENTS
            .iter()
            .any(|name| self.is_inside(name, line))
    }

    pub fn in_code(&self, line: usize) -> bool {
        self.is_inside(CODE_ENVIRONMENT, line)
    }

    pub fn in_math_like(&self, line: usize) -> bool {
        MATH_ENVIRONMENTS
            .iter()
            .any(|name| self.is_inside(name, line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn track(text: &str) -> EnvironmentTracker {
        EnvironmentTracker::build(&Document::new(text))
    }

    #[test]
    fn test_simple_figure() {
        let envs = track("\\begin{figure}\ntext\n\\end{figure}");

        assert_eq!(envs.spans("figure"), &[RegionSpan::new(0, 2)]);
        assert_eq!(envs.membership("figure"), Some(&[true, true, false][..]));
    }

    #[test]
    fn test_membership_length_matches_lines() {
        let envs = track("a\n\\begin{table}\nb\n\\end{table}\nc\n");
        assert_eq!(envs.membership("table").map(<[bool]>::len), Some(6));
        assert_eq!(envs.line_count(), 6);
    }

    #[test]
    fn test_starred_variant_shares_name() {
        let envs = track("\\begin{figure*}\nx\n\\end{figure*}");
        assert!(envs.contains("figure"));
        assert_eq!(envs.spans("figure"), &[RegionSpan::new(0, 2)]);
    }

    #[test]
    fn test_unmatched_end_has_no_start() {
        let envs = track("\\end{center}\n\\begin{center}\nx\n\\end{center}");
        assert_eq!(
            envs.spans("center"),
            &[
                RegionSpan {
                    start: None,
                    end: 0
                },
                RegionSpan::new(1, 3)
            ]
        );
        assert!(envs.spans("center")[0].body().is_none());
    }

    #[test]
    fn test_unmatched_begin_stays_open() {
        let envs = track("\\begin{itemize}\na\nb");
        assert_eq!(envs.membership("itemize"), Some(&[true, true, true][..]));
        assert!(envs.spans("itemize").is_empty());
    }

    #[test]
    fn test_reentrant_same_name_keeps_outer_span() {
        let envs = track(
            "\\begin{itemize}\n\\begin{itemize}\ninner\n\\end{itemize}\nouter\n\\end{itemize}",
        );

        assert_eq!(
            envs.spans("itemize"),
            &[RegionSpan::new(1, 3), RegionSpan::new(0, 5)]
        );
        assert_eq!(
            envs.membership("itemize"),
            Some(&[true, true, true, false, false, false][..])
        );
    }

    #[test]
    fn test_membership_changes_only_on_marker_lines() {
        let envs = track(
            r"\begin{itemize}
\begin{itemize}
inner
\end{itemize}
outer
\end{itemize}",
        );
        let membership = envs.membership("itemize").unwrap();

        // "outer" carries no marker and keeps the value of the end line above
        assert_eq!(membership[4], membership[3]);
        assert_eq!(membership[2], membership[1]);
    }

    #[test]
    fn test_begin_and_end_on_one_line() {
        let envs = track("\\begin{center}x\\end{center}\nafter");
        assert_eq!(envs.spans("center"), &[RegionSpan::new(0, 0)]);
        assert_eq!(envs.membership("center"), Some(&[true, false][..]));
    }

    #[test]
    fn test_end_of_undiscovered_name_is_ignored() {
        let envs = track("\\end{foo}\ntext");
        assert!(!envs.contains("foo"));
        assert!(envs.spans("foo").is_empty());
    }

    #[test]
    fn test_derived_queries() {
        let envs = track(
            "\\begin{table}\n\\begin{lstlisting}\ncode\n\\end{lstlisting}\n\\end{table}\n\\begin{align*}\nx\n\\end{align*}\nplain",
        );

        assert!(envs.in_float(2));
        assert!(envs.in_code(2));
        assert!(!envs.in_code(4));
        assert!(envs.in_math_like(6));
        assert!(!envs.in_any_environment(8));
        assert!(envs.in_any_environment(6));
    }

    #[test]
    fn test_names_are_sorted_and_unique() {
        let envs = track("\\begin{table}\\begin{figure}\\begin{table}");
        let names: Vec<&str> = envs.names().collect();
        assert_eq!(names, vec!["figure", "table"]);
    }
}
