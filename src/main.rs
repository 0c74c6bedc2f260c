//! paperlint - A style checker for LaTeX papers
//!
//! This is the main entry point for the CLI application.

use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use paperlint::cli::{commands, exit_codes, Cli, Commands, LogFormat};

fn main() {
    // Parse CLI arguments, keeping switch order
    let cli = Cli::parse_ordered();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.log_format);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(args, config),
        Commands::Rules(args) => commands::rules::execute(args, config),
        Commands::Init(args) => commands::init::execute(args, config),
    };

    // Handle exit codes for CI integration
    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            let exit_code = exit_codes::for_error(&e);
            eprintln!("{} {}", "Error:".red().bold(), e);
            if exit_code == exit_codes::INVALID_ARGS {
                eprintln!(
                    "Run {} to list categories and rule names",
                    "paperlint rules".cyan()
                );
            }
            std::process::exit(exit_code);
        }
    }
}

fn setup_logging(verbosity: u8, format: LogFormat) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(env_filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init(),
    }
}
