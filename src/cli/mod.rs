//! Command-line parsing for the risk report generator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! parsing/validation/calculation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "riskrep", version, about = "Financial risk model report generator (CSV/JSON -> markdown)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate the input, compute risk metrics, and print the markdown report.
    Report(ReportArgs),
    /// Parse and validate only; report problems without rendering.
    Validate(InputArgs),
    /// Print the built-in six-model sample input.
    Sample(SampleArgs),
}

/// Where to read model records from.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// CSV or JSON file with model records. Reads stdin when omitted or `-`.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write the markdown report to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Export per-model results to JSON.
    #[arg(long = "export-json", value_name = "PATH")]
    pub export_json: Option<PathBuf>,

    /// Export per-model results to CSV.
    #[arg(long = "export-csv", value_name = "PATH")]
    pub export_csv: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Render the sample through the full pipeline instead of printing the input.
    #[arg(long)]
    pub report: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_report_with_exports() {
        let cli = Cli::parse_from(["riskrep", "report", "models.csv", "-o", "out.md", "--export-json", "r.json"]);
        let Command::Report(args) = cli.command else {
            panic!("expected report subcommand");
        };
        assert_eq!(args.input.input, Some(PathBuf::from("models.csv")));
        assert_eq!(args.output, Some(PathBuf::from("out.md")));
        assert_eq!(args.export_json, Some(PathBuf::from("r.json")));
        assert!(args.export_csv.is_none());
    }

    #[test]
    fn validate_reads_stdin_by_default() {
        let cli = Cli::parse_from(["riskrep", "validate"]);
        assert!(matches!(cli.command, Command::Validate(InputArgs { input: None })));
    }
}
