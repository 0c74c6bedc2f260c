//! Rules command - List the catalogue and the active set

use colored::Colorize;
use std::path::Path;

use super::RulesArgs;
use crate::cli::exit_codes;
use crate::config::Config;
use crate::error::PaperlintError;
use crate::rules::{Category, CategorySet, Registry};

pub fn execute(args: RulesArgs, config_path: Option<&Path>) -> Result<i32, PaperlintError> {
    let config = Config::load(config_path)?;
    let registry = Registry::builtin();

    let tokens: Vec<_> = config
        .switches
        .iter()
        .cloned()
        .chain(args.switches.tokens())
        .collect();
    let active = CategorySet::from_tokens(&registry, &tokens)?;

    print!("{}", format_listing(&registry, &active, args.active));
    Ok(exit_codes::SUCCESS)
}

fn format_listing(registry: &Registry, active: &CategorySet, only_active: bool) -> String {
    let mut output = format!(
        "{} {}\n\n",
        "Categories:".bold(),
        Category::tokens().collect::<Vec<_>>().join(", ")
    );

    let width = registry.names().map(str::len).max().unwrap_or(0);

    for rule in registry.rules() {
        let is_active = active.contains(rule.name);
        if only_active && !is_active {
            continue;
        }

        let marker = if is_active {
            "✓".green().to_string()
        } else {
            "·".dimmed().to_string()
        };
        output.push_str(&format!(
            "  {} {:<width$}  {:<10}  {}\n",
            marker,
            rule.name,
            rule.category.to_string(),
            rule.description.dimmed(),
            width = width
        ));
    }

    output.push_str(&format!(
        "\n{} of {} rules active\n",
        active.len().to_string().bold(),
        registry.len()
    ));
    output
}
