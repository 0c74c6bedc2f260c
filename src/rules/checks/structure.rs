//! Document structure checks: headers, paragraphs, and lists

use lazy_static::lazy_static;
use regex::Regex;

use super::scan;
use crate::document::COMMENT_MARKER;
use crate::rules::context::AnalysisContext;
use crate::rules::results::Finding;

lazy_static! {
    static ref HEADER: Regex = Regex::new(r"(section|paragraph)\{([^}]+)\}").unwrap();
    static ref SECTION: Regex = Regex::new(r"\\section\{").unwrap();
    static ref SUBSECTION: Regex = Regex::new(r"\\subsection\{").unwrap();
    static ref BEGIN_ENUMERATE: Regex = Regex::new(r"\\begin\{enumerate\}").unwrap();
    static ref BEGIN_ITEMIZE: Regex = Regex::new(r"\\begin\{itemize\}").unwrap();
    static ref BEGIN_APPENDIX: Regex = Regex::new(r"\\begin\{appendix\}").unwrap();
    static ref BEGIN_EQNARRAY: Regex = Regex::new(r"\\begin\{eqnarray\}").unwrap();
}

/// First word longer than four characters in a header title that starts
/// lowercase.
pub fn capitalization(ctx: &AnalysisContext) -> Vec<Finding> {
    ctx.lines()
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let title = HEADER.captures(line)?.get(2)?;
            let mut offset = title.start();
            for word in title.as_str().split(' ') {
                let first = word.chars().next();
                if word.chars().count() > 4 && first.is_some_and(char::is_lowercase) {
                    let width = first.map_or(1, char::len_utf8);
                    return Some(
                        Finding::new(i, "Wrong capitalization of header")
                            .with_span(offset, offset + width),
                    );
                }
                offset += word.len() + 1;
            }
            None
        })
        .collect()
}

/// A header whose next non-blank, non-comment line is another header.
pub fn two_header(ctx: &AnalysisContext) -> Vec<Finding> {
    let lines = ctx.lines();

    lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let header = HEADER.find(line)?;
            let next = lines[i + 1..].iter().map(|l| l.trim()).find(|l| {
                !l.is_empty() && !l.starts_with(COMMENT_MARKER)
            })?;
            HEADER.is_match(next).then(|| {
                Finding::new(i, "Section header without text before next header")
                    .with_range(header.range())
            })
        })
        .collect()
}

/// A prose line surrounded by blank lines with no sentence break inside.
pub fn single_sentence(ctx: &AnalysisContext) -> Vec<Finding> {
    let lines = ctx.lines();
    if lines.len() < 3 {
        return Vec::new();
    }

    (1..lines.len() - 1)
        .filter(|&i| {
            let current = lines[i].trim();
            lines[i - 1].trim().is_empty()
                && lines[i + 1].trim().is_empty()
                && !current.is_empty()
                && !current.starts_with('\\')
                && !lines[i].contains(". ")
        })
        .map(|i| Finding::new(i, "One-sentence paragraph").with_span(0, lines[i].len()))
        .collect()
}

/// Sections holding exactly one subsection, including the last section.
pub fn single_subsection(ctx: &AnalysisContext) -> Vec<Finding> {
    let lines = ctx.lines();
    let mut findings = Vec::new();
    let mut current: Option<usize> = None;
    let mut subsections = 0usize;

    let close = |section: Option<usize>, count: usize, findings: &mut Vec<Finding>| {
        let Some(section) = section else { return };
        if count != 1 {
            return;
        }
        let mut finding = Finding::new(section, "Section only has one subsection");
        if let Some(m) = SECTION.find(&lines[section]) {
            finding = finding.with_range(m.range());
        }
        findings.push(finding);
    };

    for (i, line) in lines.iter().enumerate() {
        if SECTION.is_match(line) {
            close(current, subsections, &mut findings);
            current = Some(i);
            subsections = 0;
        }
        if SUBSECTION.is_match(line) {
            subsections += 1;
        }
    }
    close(current, subsections, &mut findings);

    findings
}

/// Compact list environments mixed with their regular counterparts.
pub fn mixed_compact(ctx: &AnalysisContext) -> Vec<Finding> {
    let mut findings = Vec::new();
    if ctx.text().contains("\\begin{compactenum}") {
        findings.extend(scan(
            ctx.lines(),
            &BEGIN_ENUMERATE,
            "compactenum mixed with enumerate",
        ));
    }
    if ctx.text().contains("\\begin{compactitem}") {
        findings.extend(scan(
            ctx.lines(),
            &BEGIN_ITEMIZE,
            "compactitem mixed with itemize",
        ));
    }
    findings
}

pub fn appendix(ctx: &AnalysisContext) -> Vec<Finding> {
    scan(
        ctx.lines(),
        &BEGIN_APPENDIX,
        "Use \\appendix instead of \\begin{appendix}",
    )
}

pub fn eqnarray(ctx: &AnalysisContext) -> Vec<Finding> {
    scan(
        ctx.lines(),
        &BEGIN_EQNARRAY,
        "Use \\begin{align} instead of \\begin{eqnarray}",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::checks::testing::{lines, run};

    #[test]
    fn test_capitalization() {
        let found = run(capitalization, "\\section{Results of the evaluation}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span.map(|s| (s.start, s.end)), Some((24, 25)));
        assert!(run(capitalization, "\\section{Results of the Evaluation}").is_empty());
        assert!(run(capitalization, "\\paragraph{The end}").is_empty());
    }

    #[test]
    fn test_two_header() {
        let text = "\\section{A}\n\n% comment\n\\subsection{B}\ntext\n\\section{C}";
        assert_eq!(lines(two_header, text), vec![Some(0)]);
    }

    #[test]
    fn test_two_header_at_end_of_document() {
        assert!(run(two_header, "\\section{A}\n\n").is_empty());
    }

    #[test]
    fn test_single_sentence() {
        let text = "\nJust one sentence here\n\nTwo sentences. Right here\n\n\\input{x}\n";
        assert_eq!(lines(single_sentence, text), vec![Some(1)]);
    }

    #[test]
    fn test_single_subsection() {
        let text = "\\section{A}\n\\subsection{A1}\n\\section{B}\n\\subsection{B1}\n\\subsection{B2}\n\\section{C}\n\\subsection{C1}";
        assert_eq!(lines(single_subsection, text), vec![Some(0), Some(5)]);
    }

    #[test]
    fn test_single_subsection_ignores_sections_without_subsections() {
        assert!(run(single_subsection, "\\section{A}\ntext\n\\section{B}").is_empty());
    }

    #[test]
    fn test_mixed_compact() {
        let text = "\\begin{compactitem}\n\\end{compactitem}\n\\begin{itemize}\n\\end{itemize}";
        assert_eq!(lines(mixed_compact, text), vec![Some(2)]);
        assert!(run(mixed_compact, "\\begin{itemize}\n\\end{itemize}").is_empty());
    }

    #[test]
    fn test_appendix_and_eqnarray() {
        assert_eq!(lines(appendix, "\\begin{appendix}"), vec![Some(0)]);
        assert_eq!(lines(eqnarray, "\\begin{eqnarray}"), vec![Some(0)]);
        assert!(run(eqnarray, "\\begin{align}").is_empty());
    }
}
