//! Wording checks

use lazy_static::lazy_static;
use regex::Regex;

use super::scan;
use crate::rules::context::AnalysisContext;
use crate::rules::results::Finding;

lazy_static! {
    static ref CONTRACTION: Regex = Regex::new(r"[^`%]\w+'[a-rt-z]").unwrap();
    static ref SENTENCE_BREAK: Regex = Regex::new(r"[.!?]\s+\w+").unwrap();
    static ref AND_OR: Regex = Regex::new(r"and/or").unwrap();
    static ref ETC: Regex = Regex::new(r"\s+etc[.\w]").unwrap();
    static ref WILL: Regex = Regex::new(r"\s+will\s+").unwrap();
    static ref CONJUNCTION_AFTER_STOP: Regex = Regex::new(r"[.!?]\s+(And|Or|But)[\s,]").unwrap();
    static ref CONJUNCTION_AT_START: Regex = Regex::new(r"^(And|Or|But)[\s,]").unwrap();

    /// Discouraged terms and their suggested replacements, after the ACM
    /// "Words Matter" list.
    static ref DISCOURAGED_TERMS: Vec<(Regex, &'static str)> = [
        (r"\bsupremacy\b", "advantage"),
        (r"\bmaster\b", "main/primary/leader/parent/host"),
        (r"\bslave\b", "secondary/replica/follower/child/worker/client"),
        (r"\bhe\b", "they"),
        (r"\bshe\b", "they"),
        (r"\bhis\b", "their"),
        (r"\bhers?\b", "their/them"),
        (r"\bhim\b", "them"),
        (r"\bmale\s?connector\b", "plug"),
        (r"\bfemale\s?connector\b", "socket"),
        (r"\bblind\b", "anonymous"),
        (r"\bblack-?\s?list\b", "blocklist/unapprovedlist"),
        (r"\bwhite-?\s?list\b", "allowlist/approvedlist"),
        (r"\bblack-?\s?hat\b", "unethical attacker/hostile force"),
        (r"\bwhite-?\s?hat\b", "ethical attacker/friendly force"),
        (r"\bblack-?\s?box\b", "opaque box"),
        (r"\bwhite-?\s?box\b", "clear box"),
        (r"\baverage\s?user\b", "common/standard/typical user"),
        (r"\babort\s?child\b", "cancel/force quit/stop/end/finalize"),
        (r"\bterminate\s?child\b", "cancel/force quit/stop/end/finalize"),
        (r"\bdark-?\s?pattern\b", "deceptive design"),
        (r"\bdummy-?\s?head\b", "temporary head"),
        (r"\bgender-?\s?bender\b", "plug-socket adapter"),
        (r"\borphaned-?\s?object\b", "unreferenced/unlinked object"),
        (r"\bsanity-?\s?check", "coherence/quick/well-formedness check"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect();

    static ref NUMERALS: Vec<(Regex, &'static str)> = [
        (r"\bthree\b", "3"),
        (r"\bfour\b", "4"),
        (r"\bfive\b", "5"),
        (r"\bsix\b", "6"),
        (r"\bseven\b", "7"),
        (r"\beight\b", "8"),
        (r"\bnine\b", "9"),
        (r"\bten\b", "10"),
        (r"\beleven\b", "11"),
        (r"\btwelve\b", "12"),
    ]
    .into_iter()
    .map(|(pattern, digits)| (Regex::new(pattern).unwrap(), digits))
    .collect();
}

/// Literal `needle` in the clean lines, underlined at its first occurrence.
fn literal(ctx: &AnalysisContext, needle: &str, message: &str) -> Vec<Finding> {
    ctx.clean_lines()
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            line.find(needle)
                .map(|at| Finding::new(i, message).with_span(at, at + needle.len()))
        })
        .collect()
}

/// One finding per matching term per line, with the replacement filled in.
fn replacements(
    ctx: &AnalysisContext,
    table: &[(Regex, &'static str)],
    message: impl Fn(&str, &str) -> String,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (i, line) in ctx.lines().iter().enumerate() {
        for (pattern, replacement) in table {
            if let Some(m) = pattern.find(line) {
                findings.push(
                    Finding::new(i, message(m.as_str(), replacement)).with_range(m.range()),
                );
            }
        }
    }
    findings
}

pub fn todo(ctx: &AnalysisContext) -> Vec<Finding> {
    literal(ctx, "TODO", "TODO found")
}

pub fn note(ctx: &AnalysisContext) -> Vec<Finding> {
    let mut findings = literal(ctx, "\\note", "\\note found");
    findings.extend(literal(ctx, "\\todo", "\\todo found"));
    findings
}

pub fn short_form(ctx: &AnalysisContext) -> Vec<Finding> {
    scan(ctx.clean_lines(), &CONTRACTION, "Contracted form used")
}

pub fn multiple_sentences(ctx: &AnalysisContext) -> Vec<Finding> {
    ctx.clean_lines()
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            SENTENCE_BREAK.find(line.trim_end()).map(|m| {
                Finding::new(i, "Multiple sentences in one line").with_range(m.range())
            })
        })
        .collect()
}

pub fn and_or(ctx: &AnalysisContext) -> Vec<Finding> {
    scan(ctx.lines(), &AND_OR, "And/or discouraged in academic writing")
}

pub fn etc(ctx: &AnalysisContext) -> Vec<Finding> {
    scan(
        ctx.lines(),
        &ETC,
        "Unspecific \"etc\" discouraged in academic writing",
    )
}

pub fn will(ctx: &AnalysisContext) -> Vec<Finding> {
    scan(ctx.lines(), &WILL, "Usage of \"will\" is discouraged.")
}

pub fn inclusion(ctx: &AnalysisContext) -> Vec<Finding> {
    replacements(ctx, &DISCOURAGED_TERMS, |found, replacement| {
        format!("Discouraged term \"{found}\", consider replacing with \"{replacement}\"")
    })
}

pub fn conjunction_start(ctx: &AnalysisContext) -> Vec<Finding> {
    let message = "Starting a sentence with a conjunction is discouraged";
    let mut findings = Vec::new();

    for (i, line) in ctx.clean_lines().iter().enumerate() {
        let line = line.trim_end();
        for pattern in [&*CONJUNCTION_AFTER_STOP, &*CONJUNCTION_AT_START] {
            if let Some(m) = pattern.find(line) {
                findings.push(Finding::new(i, message).with_range(m.range()));
            }
        }
    }
    findings
}

pub fn numeral(ctx: &AnalysisContext) -> Vec<Finding> {
    replacements(ctx, &NUMERALS, |found, digits| {
        format!("Numeral \"{found}\" should be replaced with \"{digits}\"")
    })
}
