//! Citation and cross-reference checks

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use super::scan;
use crate::rules::context::AnalysisContext;
use crate::rules::results::Finding;

lazy_static! {
    static ref GLUED_CITE: Regex = Regex::new(r"[^ ~]\\cite").unwrap();
    static ref CITE_AFTER_PREPOSITION: Regex =
        Regex::new(r"\b(?i:in|from|by|and|or)[\s~]\\cite").unwrap();
    static ref CITE_AT_START: Regex = Regex::new(r"^\s*\\cite").unwrap();
    static ref CITE_KEYS: Regex = Regex::new(r"\\(?:no)?citeA?\{([^}]+)\}").unwrap();
    static ref CONSECUTIVE_CITES: Regex =
        Regex::new(r"\\citeA?\{[^}]+\}\s*\\citeA?\{[^}]+\}").unwrap();
    static ref LABEL: Regex = Regex::new(r"\\label\{([^}]+)\}").unwrap();
}

pub fn cite_space(ctx: &AnalysisContext) -> Vec<Finding> {
    ctx.lines()
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.contains("\\etal\\cite"))
        .filter_map(|(i, line)| {
            GLUED_CITE
                .find(line)
                .map(|m| Finding::new(i, "No space before \\cite").with_range(m.range()))
        })
        .collect()
}

pub fn cite_noun(ctx: &AnalysisContext) -> Vec<Finding> {
    let mut findings = scan(
        ctx.lines(),
        &CITE_AFTER_PREPOSITION,
        "Citation is used as noun",
    );
    findings.extend(scan(
        ctx.lines(),
        &CITE_AT_START,
        "Citation at the beginning of a sentence (probably as noun)",
    ));
    findings
}

/// Keys repeated inside a single `\cite{...}`.
pub fn cite_duplicate(ctx: &AnalysisContext) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (i, line) in ctx.lines().iter().enumerate() {
        for caps in CITE_KEYS.captures_iter(line) {
            let Some(keys) = caps.get(1) else { continue };

            // trimmed key with its byte offset inside the group
            let mut offset = 0;
            let mut tokens: Vec<(&str, usize)> = Vec::new();
            for segment in keys.as_str().split(',') {
                let key = segment.trim();
                let lead = segment.len() - segment.trim_start().len();
                if !key.is_empty() {
                    tokens.push((key, offset + lead));
                }
                offset += segment.len() + 1;
            }

            let mut seen = HashSet::new();
            let mut dupes: Vec<&str> = Vec::new();
            for (key, _) in &tokens {
                if !seen.insert(*key) && !dupes.contains(key) {
                    dupes.push(*key);
                }
            }

            if let Some(first) = dupes.first() {
                let mut finding =
                    Finding::new(i, format!("Duplicate citation key: {}", dupes.join(", ")));
                if let Some((_, at)) = tokens.iter().find(|(key, _)| key == first) {
                    let start = keys.start() + at;
                    finding = finding.with_span(start, start + first.len());
                }
                findings.push(finding);
            }
        }
    }

    findings
}

pub fn multiple_cites(ctx: &AnalysisContext) -> Vec<Finding> {
    scan(
        ctx.lines(),
        &CONSECUTIVE_CITES,
        "Multiple \\cite commands, use multiple citation keys in one \\cite instead",
    )
}

/// Labels never used by any `\ref`-like command. Section labels are exempt.
pub fn label_referenced(ctx: &AnalysisContext) -> Vec<Finding> {
    let text = ctx.text();

    ctx.clean_lines()
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let caps = LABEL.captures(line)?;
            let name = caps.get(1)?.as_str();
            if name.starts_with("sec") || name.starts_with("subsec") {
                return None;
            }
            if text.contains(&format!("ref{{{name}}}")) {
                return None;
            }
            let whole = caps.get(0)?;
            Some(Finding::new(i, format!("Label {name} is not referenced")).with_range(whole.range()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::checks::testing::{lines, run};

    #[test]
    fn test_cite_space() {
        assert_eq!(lines(cite_space, "see\\cite{x}"), vec![Some(0)]);
        assert!(run(cite_space, "see ~\\cite{x}").is_empty());
        assert!(run(cite_space, "see~\\cite{x}").is_empty());
        assert!(run(cite_space, "see \\cite{x}").is_empty());
    }

    #[test]
    fn test_cite_space_span() {
        let found = run(cite_space, "see\\cite{x}");
        assert_eq!(found[0].span.map(|s| (s.start, s.end)), Some((2, 8)));
    }

    #[test]
    fn test_cite_space_etal_exempt() {
        assert!(run(cite_space, "Smith\\etal\\cite{x}").is_empty());
    }

    #[test]
    fn test_cite_noun() {
        assert_eq!(lines(cite_noun, "as shown in~\\cite{a}"), vec![Some(0)]);
        assert_eq!(lines(cite_noun, "As shown By \\cite{a}"), vec![Some(0)]);
        assert_eq!(lines(cite_noun, "  \\cite{a} showed"), vec![Some(0)]);
        assert!(run(cite_noun, "as shown~\\cite{a}").is_empty());
    }

    #[test]
    fn test_cite_duplicate() {
        let found = run(cite_duplicate, "\\cite{a, b,a} and \\nocite{c,c}");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].message, "Duplicate citation key: a");
        assert_eq!(found[0].span.map(|s| s.start), Some(6));
        assert_eq!(found[1].message, "Duplicate citation key: c");
    }

    #[test]
    fn test_cite_duplicate_underlines_whole_key() {
        // "b" also occurs inside "ab"
        let found = run(cite_duplicate, "\\cite{ab, b,b}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "Duplicate citation key: b");
        assert_eq!(found[0].span.map(|s| (s.start, s.end)), Some((10, 11)));
    }

    #[test]
    fn test_cite_duplicate_ignores_empty_keys() {
        assert!(run(cite_duplicate, "\\cite{a,,b,}").is_empty());
    }

    #[test]
    fn test_multiple_cites() {
        assert_eq!(lines(multiple_cites, "\\cite{a} \\citeA{b}"), vec![Some(0)]);
        assert!(run(multiple_cites, "\\cite{a,b}").is_empty());
    }

    #[test]
    fn test_label_referenced() {
        let text = "\\label{fig:a}\n\\label{fig:b}\nsee Figure~\\ref{fig:a}\n\\label{sec:intro}";
        let found = run(label_referenced, text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, Some(1));
        assert_eq!(found[0].message, "Label fig:b is not referenced");
    }

    #[test]
    fn test_label_in_comment_is_ignored() {
        assert!(run(label_referenced, "text % \\label{fig:x}").is_empty());
    }

    #[test]
    fn test_label_referenced_by_autoref() {
        assert!(run(label_referenced, "\\label{tab:x}\n\\autoref{tab:x}").is_empty());
    }
}
