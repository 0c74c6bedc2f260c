//! Property-based tests for document tracking, switch resolution, and the engine

use paperlint::document::{strip_comment, Document, EnvironmentTracker};
use paperlint::rules::{
    AnalysisContext, Category, CategorySet, Registry, RulesEngine, SwitchToken,
};
use proptest::prelude::*;

const BEGIN: &str = "\\begin{table}";
const END: &str = "\\end{table}";

fn table_lines() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(
        prop::sample::select(vec![BEGIN, END, "text", "\\begin{table} \\end{table}", ""]),
        0..40,
    )
}

fn document_lines() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(
        prop::sample::select(vec![
            "TODO finish",
            "% TODO hidden",
            "%glued",
            "  % indented comment with TODO",
            "as shown\\cite{a}.",
            "\\begin{figure}",
            "\\end{figure}",
            "\\section{Results}",
            "We use the GPU and the gpu.",
            "It's 50% faster etc.",
            "",
        ]),
        0..30,
    )
}

fn switch_tokens() -> impl Strategy<Value = Vec<SwitchToken>> {
    let names = prop::sample::select(vec![
        "all",
        "general",
        "typography",
        "visual",
        "style",
        "reference",
        "todo",
        "cite-space",
        "quotes",
        "hline",
    ]);
    prop::collection::vec(
        (any::<bool>(), names).prop_map(|(include, name)| {
            if include {
                SwitchToken::include(name)
            } else {
                SwitchToken::exclude(name)
            }
        }),
        0..12,
    )
}

/// Whether `token` names `rule` directly or through its category
fn covers(registry: &Registry, token: &str, rule: &str) -> bool {
    match Category::from_token(token) {
        Some(category) => registry
            .get(rule)
            .is_some_and(|r| r.category.intersects(category)),
        None => token == rule,
    }
}

proptest! {
    #[test]
    fn membership_has_one_entry_per_line(lines in table_lines()) {
        let document = Document::new(lines.join("\n"));
        let tracker = EnvironmentTracker::build(&document);

        for name in tracker.names().map(str::to_string).collect::<Vec<_>>() {
            let membership = tracker.membership(&name).unwrap();
            prop_assert_eq!(membership.len(), document.len());
        }
    }

    #[test]
    fn membership_follows_markers(lines in table_lines()) {
        let document = Document::new(lines.join("\n"));
        let tracker = EnvironmentTracker::build(&document);

        let Some(membership) = tracker.membership("table") else {
            prop_assert!(document.lines().iter().all(|l| !l.contains(BEGIN)));
            return Ok(());
        };

        let mut previous = false;
        for (i, line) in document.lines().iter().enumerate() {
            let expected = if line.contains(BEGIN) {
                true
            } else if line.contains(END) {
                false
            } else {
                previous
            };
            prop_assert_eq!(membership[i], expected, "line {}: {:?}", i, line);
            previous = membership[i];
        }
    }

    #[test]
    fn clean_line_is_a_prefix(line in "[a-z %\\\\]{0,30}") {
        let clean = strip_comment(&line);
        prop_assert!(line.starts_with(clean));
        prop_assert!(!clean.contains('%') || clean.contains("\\%"));
    }

    #[test]
    fn last_covering_switch_decides(tokens in switch_tokens()) {
        let registry = Registry::builtin();
        let set = CategorySet::from_tokens(&registry, &tokens).unwrap();

        for rule in registry.names() {
            let last = tokens
                .iter()
                .rev()
                .find(|t| covers(&registry, t.token(), rule));
            let expected = match last {
                Some(SwitchToken::Include(_)) => true,
                Some(SwitchToken::Exclude(_)) => false,
                None => tokens.is_empty(),
            };
            prop_assert_eq!(set.contains(rule), expected, "rule {}", rule);
        }
    }

    #[test]
    fn replaying_switches_is_idempotent(tokens in switch_tokens()) {
        let registry = Registry::builtin();
        let once = CategorySet::from_tokens(&registry, &tokens).unwrap();

        let mut twice_tokens = tokens.clone();
        twice_tokens.extend(tokens.iter().cloned());
        let twice = CategorySet::from_tokens(&registry, &twice_tokens).unwrap();

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn comment_lines_are_never_reported(lines in document_lines()) {
        let registry = Registry::builtin();
        let engine = RulesEngine::new(&registry, CategorySet::all(&registry));
        let ctx = AnalysisContext::from_text(lines.join("\n"));
        let results = engine.run(&ctx);

        for finding in results.active().iter().chain(results.suppressed()) {
            if let Some(line) = finding.line() {
                prop_assert!(
                    !ctx.document().is_comment_line(line),
                    "{} reported comment line {}",
                    finding.rule,
                    line
                );
            }
        }
    }

    #[test]
    fn findings_are_sorted_and_partitioned(
        lines in document_lines(),
        tokens in switch_tokens(),
    ) {
        let registry = Registry::builtin();
        let active = CategorySet::from_tokens(&registry, &tokens).unwrap();
        let engine = RulesEngine::new(&registry, active.clone());
        let results = engine.run(&AnalysisContext::from_text(lines.join("\n")));

        prop_assert!(results.active().windows(2).all(|w| w[0].line() <= w[1].line()));
        prop_assert!(results.suppressed().windows(2).all(|w| w[0].line() <= w[1].line()));
        prop_assert!(results.active().iter().all(|f| active.contains(f.rule)));
        prop_assert!(results.suppressed().iter().all(|f| !active.contains(f.rule)));
    }
}
