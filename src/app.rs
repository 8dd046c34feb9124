//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - reads the input text (file or stdin)
//! - runs the report pipeline
//! - writes the report and optional exports

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, InputArgs, ReportArgs, SampleArgs};
use crate::data::SAMPLE_MODELS_JSON;
use crate::error::{AppError, EXIT_IO};

pub mod pipeline;

/// Environment variable holding the log filter (`tracing_subscriber::EnvFilter` syntax).
pub const LOG_ENV: &str = "RISKREP_LOG";

/// Entry point for the `riskrep` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    // `riskrep` and `riskrep FILE` behave like `riskrep sample --report` and
    // `riskrep report FILE`; see `rewrite_args`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Validate(args) => handle_validate(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // Logs go to stderr so stdout carries only the report.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let text = read_input(&args.input)?;
    let run = pipeline::run_pipeline(&text)?;
    info!(input_format = %run.format, models = run.records.len(), "report generated");

    match &args.output {
        Some(path) => {
            fs::write(path, &run.markdown).map_err(|e| {
                AppError::new(EXIT_IO, format!("Failed to write report '{}': {e}", path.display()))
            })?;
            info!(path = %path.display(), "wrote report");
        }
        None => print_stdout(&run.markdown)?,
    }

    if let Some(path) = &args.export_json {
        crate::io::export::export_json_file(path, &run.records, &run.results)?;
        info!(path = %path.display(), "wrote JSON export");
    }
    if let Some(path) = &args.export_csv {
        crate::io::export::export_csv_file(path, &run.records, &run.results)?;
        info!(path = %path.display(), "wrote CSV export");
    }

    Ok(())
}

fn handle_validate(args: InputArgs) -> Result<(), AppError> {
    let text = read_input(&args)?;
    let (format, records) = pipeline::parse_and_validate(&text)?;
    println!("OK: {} model(s) valid ({format}).", records.len());
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    if args.report {
        let run = pipeline::run_pipeline(SAMPLE_MODELS_JSON)?;
        print_stdout(&run.markdown)
    } else {
        print_stdout(SAMPLE_MODELS_JSON)
    }
}

/// Read the input text from a file, or stdin for `None` / `-`.
fn read_input(args: &InputArgs) -> Result<String, AppError> {
    match args.input.as_deref() {
        Some(path) if path != Path::new("-") => read_file(path),
        _ => {
            debug!("reading input from stdin");
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| AppError::new(EXIT_IO, format!("Failed to read stdin: {e}")))?;
            Ok(buf)
        }
    }
}

fn read_file(path: &Path) -> Result<String, AppError> {
    debug!(path = %path.display(), "reading input file");
    fs::read_to_string(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to read input '{}': {e}", path.display())))
}

fn print_stdout(text: &str) -> Result<(), AppError> {
    let mut out = io::stdout().lock();
    writeln!(out, "{text}").map_err(|e| AppError::new(EXIT_IO, format!("Failed to write to stdout: {e}")))
}

/// Rewrite argv so the common cases need no subcommand.
///
/// Rules:
/// - `riskrep`                        -> `riskrep sample --report`
/// - `riskrep models.json [flags]`    -> `riskrep report models.json [flags]`
/// - `riskrep -o out.md ...`          -> `riskrep report -o out.md ...`
/// - `riskrep --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.extend(["sample".to_string(), "--report".to_string()]);
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "report" | "validate" | "sample");
    if is_subcommand {
        return argv;
    }

    // Anything else (a path, `-`, or report flags) is an implicit `report`.
    argv.insert(1, "report".to_string());
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_renders_sample() {
        assert_eq!(rewrite_args(argv(&["riskrep"])), argv(&["riskrep", "sample", "--report"]));
    }

    #[test]
    fn path_becomes_report() {
        assert_eq!(
            rewrite_args(argv(&["riskrep", "models.csv", "-o", "r.md"])),
            argv(&["riskrep", "report", "models.csv", "-o", "r.md"])
        );
        assert_eq!(rewrite_args(argv(&["riskrep", "-"])), argv(&["riskrep", "report", "-"]));
    }

    #[test]
    fn subcommands_and_help_untouched() {
        for a in [
            argv(&["riskrep", "validate", "x.json"]),
            argv(&["riskrep", "sample"]),
            argv(&["riskrep", "--help"]),
            argv(&["riskrep", "-V"]),
        ] {
            assert_eq!(rewrite_args(a.clone()), a);
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_IO);
        assert!(err.message().contains("Failed to read input"));
    }
}
