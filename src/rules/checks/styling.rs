//! Styling checks: lengths, colours, and text styles

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::rules::context::AnalysisContext;
use crate::rules::results::Finding;

const ABSOLUTE_WIDTHS: [&str; 2] = ["\\textwidth", "\\linewidth"];

/// Styled words this short are likely variables and are not tracked.
const MIN_STYLED_WORD: usize = 4;

lazy_static! {
    static ref COLORS: Vec<Regex> = [
        "red", "green", "blue", "yellow", "orange", "magenta", "cyan", "brown", "pink",
    ]
    .iter()
    .map(|color| Regex::new(&format!(r"\b{color}\b")).unwrap())
    .collect();

    /// Any of these next to a colour name makes the figure readable in
    /// greyscale.
    static ref MODIFIER: Regex =
        Regex::new(r"\bdott?(ed)?\b|\bdash(ed)?\b|\bthick\b|\bthin\b|\bdash-?dotted\b|\bhatch|\bcross|\bcheck|\bpattern").unwrap();

    static ref STYLED: Regex = Regex::new(r"\\text([^{]+)\{([^}]+)\}").unwrap();
}

pub fn dimensions(ctx: &AnalysisContext) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (i, line) in ctx.lines().iter().enumerate() {
        for width in ABSOLUTE_WIDTHS {
            if let Some(at) = line.find(width) {
                findings.push(
                    Finding::new(i, format!("use \\hsize instead of {width}"))
                        .with_span(at, at + width.len()),
                );
            }
        }
    }
    findings
}

pub fn colors(ctx: &AnalysisContext) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (i, line) in ctx.lines().iter().enumerate() {
        for color in COLORS.iter() {
            let Some(m) = color.find(line) else { continue };
            if line[..m.start()].ends_with(['=', '{']) {
                continue;
            }
            if MODIFIER.is_match(line) {
                continue;
            }
            findings.push(
                Finding::new(
                    i,
                    format!(
                        "Colors (\"{}\") without a modifier such as dashed/dotted/... should be avoided.",
                        m.as_str()
                    ),
                )
                .with_range(m.range()),
            );
        }
    }
    findings
}

/// First `\textXX{word}` of a clean line, as `(style, word, whole match)`.
fn styled(line: &str) -> Option<(&str, &str, regex::Match<'_>)> {
    let caps = STYLED.captures(line)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str(), caps.get(0)?))
}

pub fn inconsistent_textstyle(ctx: &AnalysisContext) -> Vec<Finding> {
    let mut first_style: HashMap<&str, (usize, &str)> = HashMap::new();
    let mut findings = Vec::new();

    for (i, line) in ctx.clean_lines().iter().enumerate() {
        if line.contains("newcommand") {
            continue;
        }
        let Some((style, word, whole)) = styled(line) else {
            continue;
        };
        match first_style.get(word) {
            Some(&(first_line, first)) if first != style => findings.push(
                Finding::new(
                    i,
                    format!(
                        "Word '{word}' is styled inconsistently, used with \\text{first} before at line {}",
                        first_line + 1
                    ),
                )
                .with_range(whole.range()),
            ),
            Some(_) => {}
            None => {
                first_style.insert(word, (i, style));
            }
        }
    }
    findings
}

struct StyledWord<'a> {
    word: &'a str,
    style: &'a str,
    first_line: usize,
    count: usize,
}

/// Words styled more than once that also appear without a style.
pub fn missing_textstyle(ctx: &AnalysisContext) -> Vec<Finding> {
    let lines = ctx.clean_lines();

    let mut words: Vec<StyledWord<'_>> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let Some((style, word, _)) = styled(line) else {
            continue;
        };
        if word.chars().count() < MIN_STYLED_WORD {
            continue;
        }
        match words.iter_mut().find(|w| w.word == word) {
            Some(entry) => entry.count += 1,
            None => words.push(StyledWord {
                word,
                style,
                first_line: i,
                count: 1,
            }),
        }
    }

    let patterns: Vec<(Regex, &StyledWord<'_>)> = words
        .iter()
        .filter(|w| w.count > 1)
        .filter_map(|w| {
            Regex::new(&format!(r"\b{}\b", regex::escape(w.word)))
                .ok()
                .map(|re| (re, w))
        })
        .collect();

    let mut findings = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if ctx.environments().in_code(i) {
            continue;
        }
        for (pattern, entry) in &patterns {
            let Some(m) = pattern.find(line) else { continue };
            if line[..m.start()].ends_with('{') {
                continue;
            }
            findings.push(
                Finding::new(
                    i,
                    format!(
                        "Word '{}' used without a style, used with \\text{} before at line {} (styled {} times)",
                        entry.word,
                        entry.style,
                        entry.first_line + 1,
                        entry.count
                    ),
                )
                .with_range(m.range()),
            );
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::checks::testing::{lines, run};

    #[test]
    fn test_dimensions() {
        let found = run(dimensions, "\\includegraphics[width=\\textwidth]{a} \\linewidth");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].message, "use \\hsize instead of \\textwidth");
        assert_eq!(found[0].span.map(|s| s.start), Some(23));
    }

    #[test]
    fn test_colors() {
        assert_eq!(lines(colors, "the red line shows"), vec![Some(0)]);
        assert!(run(colors, "the red dashed line shows").is_empty());
        assert!(run(colors, "\\draw[color=red]").is_empty());
        assert!(run(colors, "\\textcolor{red}{x}").is_empty());
        assert!(run(colors, "a reddish tone").is_empty());
    }

    #[test]
    fn test_inconsistent_textstyle() {
        let text = "\\textit{Rust} here\n\\textbf{Rust} there\n\\textit{Rust} again";
        let found = run(inconsistent_textstyle, text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, Some(1));
        assert_eq!(
            found[0].message,
            "Word 'Rust' is styled inconsistently, used with \\textit before at line 1"
        );
    }

    #[test]
    fn test_inconsistent_textstyle_skips_definitions() {
        let text = "\\newcommand{\\x}{\\textbf{Rust}}\n\\textit{Rust}";
        assert!(run(inconsistent_textstyle, text).is_empty());
    }

    #[test]
    fn test_missing_textstyle() {
        let text = "\\textsc{Paperlint} checks\nthe \\textsc{Paperlint} tool\nwe ran Paperlint twice";
        let found = run(missing_textstyle, text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, Some(2));
        assert_eq!(
            found[0].message,
            "Word 'Paperlint' used without a style, used with \\textsc before at line 1 (styled 2 times)"
        );
    }

    #[test]
    fn test_missing_textstyle_needs_repeated_style() {
        let text = "\\emph{x} \\textsc{Paperlint} once\nwe ran Paperlint";
        assert!(run(missing_textstyle, text).is_empty());
    }
}
