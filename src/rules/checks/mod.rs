//! Built-in rule catalogue
//!
//! Every check is a plain function of the
//! [`AnalysisContext`](super::context::AnalysisContext). Patterns are
//! compiled once per process in `lazy_static!` blocks inside each module.

mod citations;
mod floats;
mod structure;
mod styling;
mod typography;
mod wording;

use regex::Regex;

use super::category::Category;
use super::registry::Rule;
use super::results::Finding;

/// All built-in rules, in evaluation order.
pub static CATALOGUE: &[Rule] = &[
    Rule::new(
        "cite-space",
        Category::TYPOGRAPHY,
        "No space or tilde before \\cite",
        citations::cite_space,
    ),
    Rule::new(
        "figure-alignment",
        Category::STYLE,
        "Figure without a placement specifier",
        floats::figure_alignment,
    ),
    Rule::new(
        "table-alignment",
        Category::STYLE,
        "Table without a placement specifier",
        floats::table_alignment,
    ),
    Rule::new(
        "listing-alignment",
        Category::STYLE,
        "Listing without a placement specifier",
        floats::listing_alignment,
    ),
    Rule::new(
        "figure-label",
        Category::REFERENCE,
        "Figure without a \\label",
        floats::figure_label,
    ),
    Rule::new(
        "table-label",
        Category::REFERENCE,
        "Table without a \\label",
        floats::table_label,
    ),
    Rule::new(
        "listing-label",
        Category::REFERENCE,
        "Listing without a \\label",
        floats::listing_label,
    ),
    Rule::new(
        "figure-caption",
        Category::STYLE,
        "Figure without a \\caption",
        floats::figure_caption,
    ),
    Rule::new(
        "table-caption",
        Category::STYLE,
        "Table without a \\caption",
        floats::table_caption,
    ),
    Rule::new(
        "listing-caption",
        Category::STYLE,
        "Listing without a \\caption",
        floats::listing_caption,
    ),
    Rule::new(
        "resize-table",
        Category::STYLE,
        "Table scaled with \\resizebox",
        floats::resize_table,
    ),
    Rule::new(
        "dimensions",
        Category::STYLE,
        "\\textwidth or \\linewidth instead of \\hsize",
        styling::dimensions,
    ),
    Rule::new(
        "figure-caption-order",
        Category::REFERENCE,
        "Figure \\label placed before its \\caption",
        floats::figure_caption_order,
    ),
    Rule::new(
        "table-caption-order",
        Category::REFERENCE,
        "Table \\label placed before its \\caption",
        floats::table_caption_order,
    ),
    Rule::new(
        "listing-caption-order",
        Category::REFERENCE,
        "Listing \\label placed before its \\caption",
        floats::listing_caption_order,
    ),
    Rule::new("todo", Category::GENERAL, "Leftover TODO", wording::todo),
    Rule::new(
        "note",
        Category::GENERAL,
        "Leftover \\note or \\todo",
        wording::note,
    ),
    Rule::new(
        "math-numbers",
        Category::TYPOGRAPHY,
        "Plain number typeset in math mode",
        typography::math_numbers,
    ),
    Rule::new(
        "si",
        Category::TYPOGRAPHY,
        "Large number without siunitx formatting",
        typography::si,
    ),
    Rule::new(
        "listing-float",
        Category::REFERENCE,
        "lstlisting outside a listing float",
        floats::listing_float,
    ),
    Rule::new(
        "tabular-float",
        Category::REFERENCE,
        "tabular outside a table float",
        floats::tabular_float,
    ),
    Rule::new(
        "tikz-float",
        Category::REFERENCE,
        "tikzpicture outside a figure float",
        floats::tikz_float,
    ),
    Rule::new(
        "comment-space",
        Category::TYPOGRAPHY,
        "Trailing comment glued to the text",
        typography::comment_space,
    ),
    Rule::new(
        "percentage",
        Category::TYPOGRAPHY,
        "Percentage without siunitx",
        typography::percentage,
    ),
    Rule::new(
        "short-form",
        Category::GENERAL,
        "Contracted form such as don't",
        wording::short_form,
    ),
    Rule::new(
        "label-referenced",
        Category::REFERENCE,
        "\\label that is never referenced",
        citations::label_referenced,
    ),
    Rule::new(
        "capitalization",
        Category::VISUAL,
        "Header word not capitalized",
        structure::capitalization,
    ),
    Rule::new(
        "quotes",
        Category::TYPOGRAPHY,
        "Straight double quotes",
        typography::quotes,
    ),
    Rule::new(
        "hline",
        Category::VISUAL,
        "\\hline inside a tabular",
        floats::hline,
    ),
    Rule::new(
        "punctuation-space",
        Category::TYPOGRAPHY,
        "Whitespace before punctuation",
        typography::punctuation_space,
    ),
    Rule::new(
        "two-header",
        Category::VISUAL,
        "Header directly followed by another header",
        structure::two_header,
    ),
    Rule::new(
        "single-sentence",
        Category::VISUAL,
        "Paragraph made of a single sentence",
        structure::single_sentence,
    ),
    Rule::new(
        "multiple-sentences",
        Category::GENERAL,
        "More than one sentence on a line",
        wording::multiple_sentences,
    ),
    Rule::new(
        "unbalanced-brackets",
        Category::TYPOGRAPHY,
        "Parentheses do not balance on a line",
        typography::unbalanced_brackets,
    ),
    Rule::new(
        "and-or",
        Category::TYPOGRAPHY,
        "Use of and/or",
        wording::and_or,
    ),
    Rule::new(
        "ellipsis",
        Category::TYPOGRAPHY,
        "Ellipsis after a word",
        typography::ellipsis,
    ),
    Rule::new("etc", Category::STYLE, "Unspecific etc", wording::etc),
    Rule::new(
        "punctuation",
        Category::TYPOGRAPHY,
        "Long text line without closing punctuation",
        typography::punctuation,
    ),
    Rule::new(
        "footnote",
        Category::TYPOGRAPHY,
        "\\footnote placed before the full stop",
        typography::footnote,
    ),
    Rule::new(
        "vline",
        Category::VISUAL,
        "Vertical rules in a tabular",
        floats::vline,
    ),
    Rule::new(
        "table-top-caption",
        Category::STYLE,
        "Table caption below the tabular",
        floats::table_top_caption,
    ),
    Rule::new("will", Category::GENERAL, "Use of will", wording::will),
    Rule::new(
        "single-subsection",
        Category::VISUAL,
        "Section with exactly one subsection",
        structure::single_subsection,
    ),
    Rule::new(
        "mixed-compact",
        Category::VISUAL,
        "Compact and regular lists mixed",
        structure::mixed_compact,
    ),
    Rule::new(
        "float-center",
        Category::VISUAL,
        "center environment inside a float",
        floats::float_center,
    ),
    Rule::new(
        "appendix",
        Category::STYLE,
        "appendix used as an environment",
        structure::appendix,
    ),
    Rule::new(
        "eqnarray",
        Category::VISUAL,
        "eqnarray instead of align",
        structure::eqnarray,
    ),
    Rule::new(
        "inclusion",
        Category::STYLE,
        "Term with an inclusive alternative",
        wording::inclusion,
    ),
    Rule::new(
        "cite-noun",
        Category::STYLE,
        "Citation used as a noun",
        citations::cite_noun,
    ),
    Rule::new(
        "cite-duplicate",
        Category::REFERENCE,
        "Same key cited twice in one command",
        citations::cite_duplicate,
    ),
    Rule::new(
        "conjunction-start",
        Category::STYLE,
        "Sentence starting with And, Or or But",
        wording::conjunction_start,
    ),
    Rule::new(
        "bracket-spacing",
        Category::TYPOGRAPHY,
        "Spacing around parentheses",
        typography::bracket_spacing,
    ),
    Rule::new(
        "acronym-capitalization",
        Category::TYPOGRAPHY,
        "Acronym written with inconsistent case",
        typography::acronym_capitalization,
    ),
    Rule::new(
        "numeral",
        Category::GENERAL,
        "Small number spelled out",
        wording::numeral,
    ),
    Rule::new(
        "multiple-cites",
        Category::STYLE,
        "Consecutive \\cite commands",
        citations::multiple_cites,
    ),
    Rule::new(
        "colors",
        Category::VISUAL,
        "Colour named without a line or fill modifier",
        styling::colors,
    ),
    Rule::new(
        "inconsistent-textstyle",
        Category::TYPOGRAPHY,
        "Word styled with different \\text commands",
        styling::inconsistent_textstyle,
    ),
    Rule::new(
        "missing-textstyle",
        Category::TYPOGRAPHY,
        "Styled word also used unstyled",
        styling::missing_textstyle,
    ),
];

/// One finding per line for the first match of `pattern`, skipping lines
/// for which `skip` holds.
fn first_match_per_line(
    lines: &[String],
    pattern: &Regex,
    message: &str,
    skip: impl Fn(usize) -> bool,
) -> Vec<Finding> {
    lines
        .iter()
        .enumerate()
        .filter(|(i, _)| !skip(*i))
        .filter_map(|(i, line)| {
            pattern
                .find(line)
                .map(|m| Finding::new(i, message).with_range(m.range()))
        })
        .collect()
}

/// Same as [`first_match_per_line`] over every line.
fn scan(lines: &[String], pattern: &Regex, message: &str) -> Vec<Finding> {
    first_match_per_line(lines, pattern, message, |_| false)
}

/// Byte offset of the second to last character, for end-of-line underlines.
fn tail_start(line: &str) -> usize {
    line.char_indices()
        .rev()
        .nth(1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}
