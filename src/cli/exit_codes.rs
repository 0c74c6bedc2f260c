//! Exit codes for the CLI
//!
//! Standard exit codes used by the paperlint CLI for CI integration.
//!
//! # Exit Code Reference
//!
//! | Code | Constant | Meaning | Example |
//! |------|----------|---------|---------|
//! | 0 | `SUCCESS` | Success | Documents checked, or findings without `--error` |
//! | 1 | `FINDINGS` | Active findings in strict mode | `paperlint check --error paper.tex` |
//! | 3 | `ERROR` | Runtime error | Unreadable document, bad config file |
//! | 4 | `INVALID_ARGS` | Invalid switches | `-i` with an unknown category or rule |
//!
//! Command-line syntax errors (a missing value after `-i`, an unknown flag)
//! are reported by clap itself with its own usage exit status.

use crate::error::{ConfigError, PaperlintError};

/// Success - the run completed.
///
/// Used when:
/// - No active finding was emitted
/// - Findings were emitted but strict mode is off
pub const SUCCESS: i32 = 0;

/// Strict mode is on and at least one active finding was emitted.
pub const FINDINGS: i32 = 1;

/// Runtime error.
///
/// Used when:
/// - A document could not be read (after every other document was checked)
/// - The configuration file is missing or invalid
/// - A file could not be written
pub const ERROR: i32 = 3;

/// A switch names neither a category nor a rule.
pub const INVALID_ARGS: i32 = 4;

/// Exit code for an error that aborted a command
pub fn for_error(error: &PaperlintError) -> i32 {
    match error {
        PaperlintError::Config(ConfigError::UnknownSwitch(_)) => INVALID_ARGS,
        _ => ERROR,
    }
}
