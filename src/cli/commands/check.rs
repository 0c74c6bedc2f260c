//! Check command - Run the rules over documents

use colored::Colorize;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use super::{CheckArgs, OutputFormat};
use crate::cli::exit_codes;
use crate::cli::output::{CheckRun, DocumentOutcome, JsonOutput, ReportRenderer, TerminalOutput};
use crate::config::Config;
use crate::document::Document;
use crate::error::PaperlintError;
use crate::rules::{AnalysisContext, CategorySet, DocumentReport, Registry, RulesEngine};
use crate::scanner::Scanner;

/// A resolved input, before loading
enum Pending {
    Load(PathBuf),
    Failed { path: String, error: String },
}

pub fn execute(args: CheckArgs, config_path: Option<&Path>) -> Result<i32, PaperlintError> {
    let config = Config::load(config_path)?;
    let registry = Registry::builtin();

    // Configuration switches first, then the command line
    let tokens: Vec<_> = config
        .switches
        .iter()
        .cloned()
        .chain(args.switches.tokens())
        .collect();
    let active = CategorySet::from_tokens(&registry, &tokens)?;
    tracing::info!(active = active.len(), "Resolved active rules");

    let scanner = Scanner::new(&config)?;
    let pending = resolve_inputs(&scanner, &args.paths);

    let engine = RulesEngine::new(&registry, active).with_timings(args.timings);
    let outcomes: Vec<DocumentOutcome> = pending
        .into_par_iter()
        .map(|item| match item {
            Pending::Load(path) => check_document(&engine, &path),
            Pending::Failed { path, error } => DocumentOutcome::Failed { path, error },
        })
        .collect();
    let run = CheckRun::new(outcomes);

    let renderer: Box<dyn ReportRenderer> = match args.format {
        OutputFormat::Terminal => Box::new(TerminalOutput::new().with_timings(args.timings)),
        OutputFormat::Json => Box::new(JsonOutput::new().with_timings(args.timings)),
    };
    let rendered = renderer.render(&run)?;

    if let Some(output_path) = &args.output {
        std::fs::write(output_path, &rendered).map_err(|e| PaperlintError::FileWrite {
            path: output_path.display().to_string(),
            source: e,
        })?;
        eprintln!(
            "{} Report written to: {}",
            "Success:".green().bold(),
            output_path.display().to_string().cyan()
        );
    } else {
        print!("{}", rendered);
    }

    let strict = args.error || config.strict;
    let exit_code = if run.has_failures() {
        exit_codes::ERROR
    } else if strict && run.active_count() > 0 {
        exit_codes::FINDINGS
    } else {
        exit_codes::SUCCESS
    };

    Ok(exit_code)
}

/// Expand every argument in order, keeping failures in place.
fn resolve_inputs(scanner: &Scanner, paths: &[PathBuf]) -> Vec<Pending> {
    let mut pending = Vec::new();

    for path in paths {
        let discovery = scanner.discover(std::slice::from_ref(path));
        for error in discovery.errors {
            tracing::warn!(path = %path.display(), "{}", error);
            pending.push(Pending::Failed {
                path: path.display().to_string(),
                error: error.to_string(),
            });
        }
        pending.extend(discovery.documents.into_iter().map(Pending::Load));
    }

    pending
}

fn check_document(engine: &RulesEngine<'_>, path: &Path) -> DocumentOutcome {
    let shown = path.display().to_string();

    match Document::load(path) {
        Ok(document) => {
            tracing::debug!(path = %shown, lines = document.len(), "Checking document");
            let ctx = AnalysisContext::new(document);
            let results = engine.run(&ctx);
            let lines = ctx.into_document().lines().to_vec();
            DocumentOutcome::Checked(DocumentReport::new(shown, lines, results))
        }
        Err(e) => {
            tracing::warn!(path = %shown, "{}", e);
            DocumentOutcome::Failed {
                path: shown,
                error: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::SwitchArgs;
    use std::fs;
    use tempfile::tempdir;

    fn args(paths: Vec<PathBuf>) -> CheckArgs {
        CheckArgs {
            paths,
            switches: SwitchArgs::default(),
            error: false,
            format: OutputFormat::Json,
            output: None,
            timings: false,
        }
    }

    fn empty_config(dir: &Path) -> PathBuf {
        let path = dir.join("paperlint.toml");
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_exit_success_without_strict() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("a.tex");
        fs::write(&doc, "TODO write this\n").unwrap();

        let code = execute(args(vec![doc]), Some(&empty_config(dir.path()))).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
    }

    #[test]
    fn test_exit_findings_when_strict() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("a.tex");
        fs::write(&doc, "TODO write this\n").unwrap();

        let mut args = args(vec![doc]);
        args.error = true;
        let code = execute(args, Some(&empty_config(dir.path()))).unwrap();
        assert_eq!(code, exit_codes::FINDINGS);
    }

    #[test]
    fn test_strict_from_config() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("a.tex");
        fs::write(&doc, "TODO write this\n").unwrap();
        let config = dir.path().join("strict.toml");
        fs::write(&config, "strict = true\n").unwrap();

        let code = execute(args(vec![doc]), Some(&config)).unwrap();
        assert_eq!(code, exit_codes::FINDINGS);
    }

    #[test]
    fn test_missing_input_is_an_error_after_checking_others() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("a.tex");
        fs::write(&doc, "Clean text.\n").unwrap();
        let report = dir.path().join("out.json");

        let mut args = args(vec![dir.path().join("missing.tex"), doc]);
        args.output = Some(report.clone());
        let code = execute(args, Some(&empty_config(dir.path()))).unwrap();
        assert_eq!(code, exit_codes::ERROR);

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(report).unwrap()).unwrap();
        assert_eq!(value["documents"].as_array().unwrap().len(), 1);
        assert_eq!(value["errors"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_unreadable_document_is_reported_in_place() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("latin1.tex");
        fs::write(&bad, [0xff, 0xfe, b'x']).unwrap();
        let good = dir.path().join("b.tex");
        fs::write(&good, "").unwrap();
        let report = dir.path().join("out.json");

        let mut args = args(vec![bad.clone(), good]);
        args.output = Some(report.clone());
        let code = execute(args, Some(&empty_config(dir.path()))).unwrap();
        assert_eq!(code, exit_codes::ERROR);

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(report).unwrap()).unwrap();
        assert_eq!(value["errors"][0]["path"], bad.display().to_string());
        assert!(value["errors"][0]["error"]
            .as_str()
            .unwrap()
            .starts_with("Could not open"));
        assert_eq!(value["documents"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_switch_aborts() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("a.tex");
        fs::write(&doc, "x\n").unwrap();

        let mut args = args(vec![doc]);
        args.switches.include.push("nonexistent".to_string());
        let err = execute(args, Some(&empty_config(dir.path()))).unwrap_err();
        assert_eq!(exit_codes::for_error(&err), exit_codes::INVALID_ARGS);
    }

    #[test]
    fn test_config_switches_run_before_cli_switches() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("a.tex");
        fs::write(&doc, "TODO write this\n").unwrap();
        let config = dir.path().join("c.toml");
        fs::write(&config, "switches = [{ exclude = \"all\" }]\n").unwrap();
        let report = dir.path().join("out.json");

        let mut args = args(vec![doc]);
        args.error = true;
        args.output = Some(report.clone());
        args.switches.include.push("todo".to_string());
        let code = execute(args, Some(&config)).unwrap();
        assert_eq!(code, exit_codes::FINDINGS);

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(report).unwrap()).unwrap();
        let active = value["documents"][0]["active"].as_array().unwrap();
        assert!(active.iter().all(|f| f["rule"] == "todo"));
    }
}
