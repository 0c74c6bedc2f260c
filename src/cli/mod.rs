//! # CLI Module
//!
//! This module defines the command-line interface for paperlint using `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `check` | Check documents and print findings |
//! | `rules` | List the rule catalogue and the active set |
//! | `init` | Write a default configuration file |
//!
//! ## Switches
//!
//! `-i SWITCH` includes and `-x SWITCH` excludes a category (`all`,
//! `general`, `reference`, `style`, `typography`, `visual`) or a single rule.
//! They are applied in the order they appear on the command line, after the
//! switches of the configuration file.
//!
//! ## Examples
//!
//! ```bash
//! # Check a paper with every rule
//! paperlint check paper.tex
//!
//! # Only typography, but keep the quotes rule out, failing on findings
//! paperlint check chapters/ -i typography -x quotes --error
//! ```

pub mod commands;
pub mod exit_codes;
pub mod output;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum};

use crate::rules::SwitchToken;
use commands::{CheckArgs, InitArgs, RulesArgs, SwitchArgs};

/// paperlint - Style checker for LaTeX papers
#[derive(Parser, Debug)]
#[command(name = "paperlint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Format of diagnostic logs on stderr
    #[arg(
        long,
        global = true,
        value_enum,
        default_value = "text",
        env = "PAPERLINT_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Log output formats
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check documents for style issues
    Check(CheckArgs),

    /// List rules, their categories, and which ones are active
    Rules(RulesArgs),

    /// Write a default configuration file
    Init(InitArgs),
}

impl Commands {
    fn switches_mut(&mut self) -> Option<&mut SwitchArgs> {
        match self {
            Self::Check(args) => Some(&mut args.switches),
            Self::Rules(args) => Some(&mut args.switches),
            Self::Init(_) => None,
        }
    }
}

impl Cli {
    /// Parse the process arguments, exiting with usage on error.
    pub fn parse_ordered() -> Self {
        Self::try_parse_ordered_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parse `args`, keeping `-i`/`-x` in command-line order.
    ///
    /// clap collects each flag into its own list; the relative order is
    /// recovered from the argument indices.
    pub fn try_parse_ordered_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        let mut cli = Self::from_arg_matches(&matches)?;

        if let Some((_, sub)) = matches.subcommand() {
            if let Some(switches) = cli.command.switches_mut() {
                switches.ordered = ordered_switches(sub);
            }
        }
        Ok(cli)
    }
}

/// Merge `--include` and `--exclude` values by their position.
fn ordered_switches(matches: &ArgMatches) -> Vec<SwitchToken> {
    let mut indexed: Vec<(usize, SwitchToken)> = Vec::new();

    let kinds: [(&str, fn(String) -> SwitchToken); 2] = [
        ("include", SwitchToken::Include),
        ("exclude", SwitchToken::Exclude),
    ];
    for (id, make) in kinds {
        let values = matches.try_get_many::<String>(id).ok().flatten();
        let indices = matches.indices_of(id);
        if let (Some(values), Some(indices)) = (values, indices) {
            indexed.extend(indices.zip(values).map(|(i, v)| (i, make(v.clone()))));
        }
    }

    indexed.sort_by_key(|(i, _)| *i);
    indexed.into_iter().map(|(_, token)| token).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_ordered_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_switch_order_is_kept() {
        let cli = parse(&[
            "paperlint", "check", "p.tex", "-x", "style", "-i", "etc", "-x", "all", "-i", "todo",
        ]);
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(
            args.switches.tokens(),
            vec![
                SwitchToken::exclude("style"),
                SwitchToken::include("etc"),
                SwitchToken::exclude("all"),
                SwitchToken::include("todo"),
            ]
        );
    }

    #[test]
    fn test_no_switches() {
        let cli = parse(&["paperlint", "check", "p.tex"]);
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert!(args.switches.tokens().is_empty());
        assert!(!args.error);
    }

    #[test]
    fn test_global_flags() {
        let cli = parse(&["paperlint", "-vv", "rules", "--config", "x.toml", "-i", "style"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert_eq!(cli.log_format, LogFormat::Text);
        let Commands::Rules(args) = cli.command else {
            panic!("expected rules");
        };
        assert_eq!(args.switches.tokens(), vec![SwitchToken::include("style")]);
    }

    #[test]
    fn test_missing_switch_value_is_a_usage_error() {
        assert!(Cli::try_parse_ordered_from(["paperlint", "check", "p.tex", "-i"]).is_err());
    }

    #[test]
    fn test_check_requires_a_path() {
        assert!(Cli::try_parse_ordered_from(["paperlint", "check"]).is_err());
    }
}
