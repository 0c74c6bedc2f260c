//! Float and table checks
//!
//! Most of these look at the closed spans of `figure`, `table`, and
//! `listing`. Spans whose `\end` had no matching `\begin` have no body and
//! are skipped.

use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

use super::first_match_per_line;
use crate::rules::context::AnalysisContext;
use crate::rules::results::Finding;

/// The three float environments that get caption and label checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FloatKind {
    Figure,
    Table,
    Listing,
}

impl FloatKind {
    fn env(self) -> &'static str {
        match self {
            Self::Figure => "figure",
            Self::Table => "table",
            Self::Listing => "listing",
        }
    }

    fn begin(self) -> &'static Regex {
        match self {
            Self::Figure => &BEGIN_FIGURE,
            Self::Table => &BEGIN_TABLE,
            Self::Listing => &BEGIN_LISTING,
        }
    }

    fn placement(self) -> &'static Regex {
        match self {
            Self::Figure => &PLACED_FIGURE,
            Self::Table => &PLACED_TABLE,
            Self::Listing => &PLACED_LISTING,
        }
    }
}

lazy_static! {
    static ref BEGIN_FIGURE: Regex = Regex::new(r"\\begin\{figure\}").unwrap();
    static ref BEGIN_TABLE: Regex = Regex::new(r"\\begin\{table\}").unwrap();
    static ref BEGIN_LISTING: Regex = Regex::new(r"\\begin\{listing\}").unwrap();
    static ref PLACED_FIGURE: Regex = Regex::new(r"figure\}\[[^\]]*[htbH][^\]]*\]").unwrap();
    static ref PLACED_TABLE: Regex = Regex::new(r"table\}\[[^\]]*[htbH][^\]]*\]").unwrap();
    static ref PLACED_LISTING: Regex = Regex::new(r"listing\}\[[^\]]*[htbH][^\]]*\]").unwrap();
    static ref BEGIN_CENTER: Regex = Regex::new(r"\\begin\{center\}").unwrap();
    static ref HLINE: Regex = Regex::new(r"\\hline").unwrap();
    static ref TABULAR_COLUMNS: Regex = Regex::new(r"\\begin\{tabular\}\{([^}]+)\}").unwrap();
}

const LABEL: &str = "\\label{";
const CAPTION: &str = "\\caption{";

/// Bodies of every closed span of `env`, as `(start line, body range)`.
fn bodies<'a>(
    ctx: &'a AnalysisContext,
    env: &str,
) -> impl Iterator<Item = (usize, Range<usize>)> + 'a {
    ctx.environments()
        .spans(env)
        .iter()
        .filter_map(|span| span.body().map(|body| (body.start, body)))
}

/// Last line of `body` whose raw text contains `needle`.
fn last_line_with(ctx: &AnalysisContext, body: Range<usize>, needle: &str) -> Option<usize> {
    body.filter(|&i| ctx.lines()[i].contains(needle)).last()
}

fn alignment(ctx: &AnalysisContext, kind: FloatKind) -> Vec<Finding> {
    ctx.lines()
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let begin = kind.begin().find(line)?;
            if kind.placement().is_match(line) {
                return None;
            }
            Some(
                Finding::new(i, format!("{} without alignment: {}", kind.env(), line.trim()))
                    .with_range(begin.range()),
            )
        })
        .collect()
}

fn missing_in_body(ctx: &AnalysisContext, kind: FloatKind, needle: &str, what: &str) -> Vec<Finding> {
    bodies(ctx, kind.env())
        .filter(|(_, body)| last_line_with(ctx, body.clone(), needle).is_none())
        .map(|(start, _)| Finding::new(start, format!("{} without a {what}", kind.env())))
        .collect()
}

fn caption_order(ctx: &AnalysisContext, kind: FloatKind) -> Vec<Finding> {
    bodies(ctx, kind.env())
        .filter_map(|(start, body)| {
            let caption = last_line_with(ctx, body.clone(), CAPTION)?;
            let label = last_line_with(ctx, body, LABEL)?;
            (label < caption).then(|| {
                Finding::new(
                    start,
                    format!(
                        "label before caption in {}, swap for correct references",
                        kind.env()
                    ),
                )
            })
        })
        .collect()
}

/// `env` spans whose first line is not inside `float`.
fn outside_float(ctx: &AnalysisContext, env: &str, float: &str) -> Vec<Finding> {
    ctx.environments()
        .spans(env)
        .iter()
        .filter_map(|span| span.start)
        .filter(|&start| !ctx.environments().is_inside(float, start))
        .map(|start| Finding::new(start, format!("{env} not within {float} environment")))
        .collect()
}

pub fn figure_alignment(ctx: &AnalysisContext) -> Vec<Finding> {
    alignment(ctx, FloatKind::Figure)
}

pub fn table_alignment(ctx: &AnalysisContext) -> Vec<Finding> {
    alignment(ctx, FloatKind::Table)
}

pub fn listing_alignment(ctx: &AnalysisContext) -> Vec<Finding> {
    alignment(ctx, FloatKind::Listing)
}

pub fn figure_label(ctx: &AnalysisContext) -> Vec<Finding> {
    missing_in_body(ctx, FloatKind::Figure, LABEL, "label")
}

pub fn table_label(ctx: &AnalysisContext) -> Vec<Finding> {
    missing_in_body(ctx, FloatKind::Table, LABEL, "label")
}

pub fn listing_label(ctx: &AnalysisContext) -> Vec<Finding> {
    missing_in_body(ctx, FloatKind::Listing, LABEL, "label")
}

pub fn figure_caption(ctx: &AnalysisContext) -> Vec<Finding> {
    missing_in_body(ctx, FloatKind::Figure, CAPTION, "caption")
}

pub fn table_caption(ctx: &AnalysisContext) -> Vec<Finding> {
    missing_in_body(ctx, FloatKind::Table, CAPTION, "caption")
}

pub fn listing_caption(ctx: &AnalysisContext) -> Vec<Finding> {
    missing_in_body(ctx, FloatKind::Listing, CAPTION, "caption")
}

pub fn figure_caption_order(ctx: &AnalysisContext) -> Vec<Finding> {
    caption_order(ctx, FloatKind::Figure)
}

pub fn table_caption_order(ctx: &AnalysisContext) -> Vec<Finding> {
    caption_order(ctx, FloatKind::Table)
}

pub fn listing_caption_order(ctx: &AnalysisContext) -> Vec<Finding> {
    caption_order(ctx, FloatKind::Listing)
}

pub fn resize_table(ctx: &AnalysisContext) -> Vec<Finding> {
    bodies(ctx, FloatKind::Table.env())
        .filter(|(_, body)| last_line_with(ctx, body.clone(), "\\resizebox{").is_some())
        .map(|(start, _)| Finding::new(start, "table with resizebox -> use adjustbox instead"))
        .collect()
}

pub fn table_top_caption(ctx: &AnalysisContext) -> Vec<Finding> {
    bodies(ctx, FloatKind::Table.env())
        .filter_map(|(start, body)| {
            let caption = last_line_with(ctx, body.clone(), CAPTION)?;
            let tabular = last_line_with(ctx, body, "\\begin{tabular")?;
            (tabular < caption).then(|| Finding::new(start, "Table caption must be above table"))
        })
        .collect()
}

pub fn listing_float(ctx: &AnalysisContext) -> Vec<Finding> {
    outside_float(ctx, "lstlisting", "listing")
}

pub fn tabular_float(ctx: &AnalysisContext) -> Vec<Finding> {
    outside_float(ctx, "tabular", "table")
}

pub fn tikz_float(ctx: &AnalysisContext) -> Vec<Finding> {
    outside_float(ctx, "tikzpicture", "figure")
}

pub fn float_center(ctx: &AnalysisContext) -> Vec<Finding> {
    ctx.environments()
        .spans("center")
        .iter()
        .filter_map(|span| span.start)
        .filter(|&start| ctx.environments().in_float(start))
        .map(|start| {
            let finding = Finding::new(
                start,
                "Use \\centering instead of \\begin{center} inside floats",
            );
            match BEGIN_CENTER.find(&ctx.lines()[start]) {
                Some(m) => finding.with_range(m.range()),
                None => finding,
            }
        })
        .collect()
}

/// `\hline` on a line inside a tabular.
pub fn hline(ctx: &AnalysisContext) -> Vec<Finding> {
    first_match_per_line(
        ctx.lines(),
        &HLINE,
        "\\hline in table, consider using \\toprule, \\midrule, \\bottomrule.",
        |i| !ctx.environments().is_inside("tabular", i),
    )
}

pub fn vline(ctx: &AnalysisContext) -> Vec<Finding> {
    ctx.lines()
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let caps = TABULAR_COLUMNS.captures(line)?;
            if !caps.get(1)?.as_str().contains('|') {
                return None;
            }
            Some(
                Finding::new(i, "Vertical lines in tables are discouraged")
                    .with_range(caps.get(0)?.range()),
            )
        })
        .collect()
}
