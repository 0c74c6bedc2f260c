//! Init command - Initialize a new configuration file

use colored::Colorize;
use std::fs;
use std::path::Path;

use super::InitArgs;
use crate::cli::exit_codes;
use crate::config::{Config, CONFIG_FILENAME};
use crate::error::PaperlintError;

const HEADER: &str = "\
# paperlint configuration
#
# switches run before -i/-x on the command line, in order:
# switches = [{ exclude = \"all\" }, { include = \"typography\" }, { exclude = \"quotes\" }]

";

pub fn execute(args: InitArgs, config_path: Option<&Path>) -> Result<i32, PaperlintError> {
    let config_path = config_path.unwrap_or(Path::new(CONFIG_FILENAME));

    if config_path.exists() && !args.force {
        eprintln!(
            "{} Configuration file already exists. Use --force to overwrite.",
            "Error:".red().bold()
        );
        return Ok(exit_codes::ERROR);
    }

    let config_content = format!("{}{}", HEADER, Config::default().to_toml()?);
    fs::write(config_path, &config_content).map_err(|e| PaperlintError::FileWrite {
        path: config_path.display().to_string(),
        source: e,
    })?;

    println!(
        "{} Created {}",
        "Success:".green().bold(),
        config_path.display().to_string().cyan()
    );

    println!("\nNext steps:");
    println!("  1. Review and customize {}", config_path.display().to_string().cyan());
    println!("  2. Run {} to see which rules are active", "paperlint rules".cyan());
    println!("  3. Run {} to check your paper", "paperlint check paper.tex".cyan());

    Ok(exit_codes::SUCCESS)
}
