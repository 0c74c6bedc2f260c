//! Typography checks: spacing, punctuation, numbers, and case

use lazy_static::lazy_static;
use regex::Regex;

use super::{first_match_per_line, scan, tail_start};
use crate::document::COMMENT_MARKER;
use crate::rules::context::AnalysisContext;
use crate::rules::results::Finding;

lazy_static! {
    static ref MATH_NUMBER: Regex = Regex::new(r"\$\d+\$").unwrap();
    static ref LARGE_NUMBER: Regex = Regex::new(r"[\s(]\d{5,}[\s),.]").unwrap();
    static ref PERCENT: Regex = Regex::new(r"\d+\s*\\%").unwrap();
    static ref GLUED_COMMENT: Regex = Regex::new(r"[^\s\\}{%]+%").unwrap();
    static ref OPENING_QUOTE: Regex = Regex::new(r#"[^\\]"\w+"#).unwrap();
    static ref CLOSING_QUOTE: Regex = Regex::new(r#"\w+""#).unwrap();
    static ref SPACE_BEFORE_PUNCTUATION: Regex = Regex::new(r"\s+[,.!?:;]").unwrap();
    static ref ELLIPSIS: Regex = Regex::new(r"\w+\.\.\.").unwrap();
    static ref FOOTNOTE_BEFORE_STOP: Regex = Regex::new(r"\s*\\footnote\{[^}]+\}\.").unwrap();
    static ref CLOSED_LINE: Regex = Regex::new(r"\s*[\w})$]+[.!?}{:;\\]\s*$").unwrap();
    static ref GLUED_PAREN: Regex = Regex::new(r"[^\s{~\\]\([^(s)]").unwrap();
    static ref SPACE_AFTER_PAREN: Regex = Regex::new(r"\(\s").unwrap();
    static ref SPACE_BEFORE_PAREN: Regex = Regex::new(r"\s\)").unwrap();
    static ref ACRONYM: Regex = Regex::new(r"\b[A-Z]{3,}\b").unwrap();
}

pub fn math_numbers(ctx: &AnalysisContext) -> Vec<Finding> {
    first_match_per_line(
        ctx.lines(),
        &MATH_NUMBER,
        "Number in math mode, consider using siunitx instead",
        |i| ctx.environments().in_float(i),
    )
}

pub fn si(ctx: &AnalysisContext) -> Vec<Finding> {
    first_match_per_line(
        ctx.lines(),
        &LARGE_NUMBER,
        "Large number without formatting, consider using siunitx",
        |i| ctx.environments().in_float(i),
    )
}

pub fn percentage(ctx: &AnalysisContext) -> Vec<Finding> {
    scan(ctx.lines(), &PERCENT, "Number with percent without siunitx")
}

/// A trailing comment marker glued to the preceding word.
pub fn comment_space(ctx: &AnalysisContext) -> Vec<Finding> {
    first_match_per_line(
        ctx.lines(),
        &GLUED_COMMENT,
        "Comment without a whitespace before",
        |i| {
            let trimmed = ctx.lines()[i].trim();
            trimmed.starts_with(COMMENT_MARKER) || ctx.environments().in_code(i)
        },
    )
}

pub fn quotes(ctx: &AnalysisContext) -> Vec<Finding> {
    ctx.clean_lines()
        .iter()
        .enumerate()
        .filter(|(i, _)| !ctx.environments().in_code(*i))
        .filter_map(|(i, line)| {
            let found = OPENING_QUOTE
                .find(line)
                .or_else(|| CLOSING_QUOTE.find(line))?;
            Some(
                Finding::new(i, "Wrong quotation, use `` and '' instead of \"")
                    .with_range(found.range()),
            )
        })
        .collect()
}

pub fn punctuation_space(ctx: &AnalysisContext) -> Vec<Finding> {
    first_match_per_line(
        ctx.lines(),
        &SPACE_BEFORE_PUNCTUATION,
        "Spacing before punctuation",
        |i| ctx.environments().in_any_environment(i),
    )
}

/// Lines whose `(` and `)` counts differ. The underline runs from the first
/// to the last parenthesis.
pub fn unbalanced_brackets(ctx: &AnalysisContext) -> Vec<Finding> {
    ctx.lines()
        .iter()
        .enumerate()
        .filter(|(i, _)| !ctx.environments().in_code(*i))
        .filter_map(|(i, line)| {
            let opening = line.matches('(').count();
            let closing = line.matches(')').count();
            if opening == closing {
                return None;
            }
            let first = line.find(['(', ')'])?;
            let last = line.rfind(['(', ')'])?;
            Some(
                Finding::new(i, "Mismatch of opening and closing parenthesis")
                    .with_span(first, last + 1),
            )
        })
        .collect()
}

pub fn ellipsis(ctx: &AnalysisContext) -> Vec<Finding> {
    scan(
        ctx.lines(),
        &ELLIPSIS,
        "Ellipsis \"...\" discouraged in academic writing",
    )
}

pub fn footnote(ctx: &AnalysisContext) -> Vec<Finding> {
    scan(
        ctx.lines(),
        &FOOTNOTE_BEFORE_STOP,
        "Footnote must be after the full stop",
    )
}

/// Long prose lines that end without any closing punctuation.
pub fn punctuation(ctx: &AnalysisContext) -> Vec<Finding> {
    let envs = ctx.environments();

    ctx.clean_lines()
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let trimmed = line.trim();
            if trimmed.chars().count() < 10 || trimmed.split(' ').count() < 8 {
                return None;
            }
            if envs.in_float(i) || envs.in_code(i) {
                return None;
            }
            if trimmed.starts_with('\\') || trimmed.starts_with(COMMENT_MARKER) {
                return None;
            }
            if trimmed.ends_with("\\\\") || trimmed.ends_with(['}', '.', '!', '?', ':', ';']) {
                return None;
            }
            if CLOSED_LINE.is_match(line.trim_end()) {
                return None;
            }
            Some(
                Finding::new(i, "Line ends without punctuation")
                    .with_span(tail_start(line), line.len()),
            )
        })
        .collect()
}

/// Whether the prefix up to `end` holds an even number of `$`, i.e. the
/// match is not inside inline math.
fn outside_inline_math(line: &str, end: usize) -> bool {
    line[..end].matches('$').count() % 2 == 0
}

pub fn bracket_spacing(ctx: &AnalysisContext) -> Vec<Finding> {
    let envs = ctx.environments();
    let checks: [(&Regex, &str); 3] = [
        (
            &*GLUED_PAREN,
            "There must be a space before an opening parenthesis",
        ),
        (
            &*SPACE_AFTER_PAREN,
            "There must be no space after an opening parenthesis",
        ),
        (
            &*SPACE_BEFORE_PAREN,
            "There must be no space before a closing parenthesis",
        ),
    ];

    let mut findings = Vec::new();
    for (i, line) in ctx.clean_lines().iter().enumerate() {
        if envs.in_code(i) || envs.in_math_like(i) {
            continue;
        }
        let trimmed = line.trim();
        if trimmed.starts_with('\\') || trimmed.starts_with(COMMENT_MARKER) {
            continue;
        }
        let line = line.trim_end();
        for (pattern, message) in checks {
            if let Some(m) = pattern.find(line) {
                if outside_inline_math(line, m.end()) {
                    findings.push(Finding::new(i, message).with_range(m.range()));
                }
            }
        }
    }
    findings
}

/// Acronyms are collected from their first all-caps use, then every
/// later use with different case is reported.
pub fn acronym_capitalization(ctx: &AnalysisContext) -> Vec<Finding> {
    let envs = ctx.environments();
    let lines = ctx.clean_lines();

    let mut acronyms: Vec<(&str, usize)> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if envs.in_code(i) {
            continue;
        }
        let Some(m) = ACRONYM.find(line) else {
            continue;
        };
        if acronyms.iter().any(|(a, _)| *a == m.as_str()) {
            continue;
        }
        if line[..m.start()].ends_with('\\') {
            continue;
        }
        acronyms.push((m.as_str(), i));
    }

    let patterns: Vec<(Regex, usize)> = acronyms
        .iter()
        .filter_map(|(acronym, first)| {
            Regex::new(&format!(r"(?i)\b{}\b", regex::escape(acronym)))
                .ok()
                .map(|re| (re, *first))
        })
        .collect();

    let mut findings = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if envs.in_code(i) || line.contains('@') {
            continue;
        }
        for (pattern, first) in &patterns {
            let Some(m) = pattern.find(line) else {
                continue;
            };
            let before = &line[..m.start()];
            if before.matches('{').count() != before.matches('}').count() {
                continue;
            }
            if before.ends_with('\\') {
                continue;
            }
            if m.as_str().chars().any(char::is_lowercase) {
                findings.push(
                    Finding::new(
                        i,
                        format!(
                            "(Potential) acronym with wrong capitalization (first defined in Line {})",
                            first + 1
                        ),
                    )
                    .with_range(m.range()),
                );
            }
        }
    }
    findings
}
