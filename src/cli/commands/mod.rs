//! CLI commands module

pub mod check;
pub mod init;
pub mod rules;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::rules::SwitchToken;

/// Category and rule switches shared by `check` and `rules`
#[derive(Args, Debug, Default, Clone)]
pub struct SwitchArgs {
    /// Include a category (all, general, reference, style, typography, visual) or a rule
    #[arg(short = 'i', long = "include", value_name = "SWITCH")]
    pub include: Vec<String>,

    /// Exclude a category or a rule
    #[arg(short = 'x', long = "exclude", value_name = "SWITCH")]
    pub exclude: Vec<String>,

    /// Both lists merged in command-line order, filled in after parsing
    #[arg(skip)]
    pub(crate) ordered: Vec<SwitchToken>,
}

impl SwitchArgs {
    /// Switches in the order they were given.
    ///
    /// Without positional information (arguments built in code), includes
    /// come before excludes.
    pub fn tokens(&self) -> Vec<SwitchToken> {
        if !self.ordered.is_empty() {
            return self.ordered.clone();
        }
        self.include
            .iter()
            .map(|s| SwitchToken::Include(s.clone()))
            .chain(self.exclude.iter().map(|s| SwitchToken::Exclude(s.clone())))
            .collect()
    }
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to check
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub switches: SwitchArgs,

    /// Exit with a non-zero code when any finding is reported
    #[arg(short, long)]
    pub error: bool,

    /// Output format
    #[arg(short, long, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Show the slowest rules of every document
    #[arg(long)]
    pub timings: bool,
}

/// Arguments for the rules command
#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(flatten)]
    pub switches: SwitchArgs,

    /// Only list the rules that would run
    #[arg(long)]
    pub active: bool,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output
    #[default]
    Terminal,
    /// JSON output
    Json,
}
