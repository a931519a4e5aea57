//! Command-line argument definitions.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Time-tracking export converter.
///
/// Converts Jiffy JSON and Toggl Track CSV exports into Toggl or Clockify
/// CSV, normalizing timestamps into a configurable output timezone.
#[derive(Debug, Parser)]
#[command(name = "tp", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert an export file to another format.
    Convert(ConvertArgs),

    /// Summarize an export file without converting it.
    Inspect(InspectArgs),
}

/// Source export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceFormat {
    /// Jiffy JSON export.
    Jiffy,
    /// Toggl Track CSV export.
    Toggl,
}

/// Target export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetFormat {
    /// Toggl Track CSV.
    Toggl,
    /// Clockify CSV.
    Clockify,
}

impl TargetFormat {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Toggl => "toggl",
            Self::Clockify => "clockify",
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments for `tp convert`.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input export file (Jiffy JSON or Toggl CSV).
    pub input: PathBuf,

    /// Target format.
    #[arg(short = 'm', long, value_enum)]
    pub to: TargetFormat,

    /// Source format; inferred from the input extension when omitted.
    #[arg(long, value_enum)]
    pub from: Option<SourceFormat>,

    /// Output CSV file (default: next to the input file).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Email address stamped on every exported row.
    #[arg(long)]
    pub email: Option<String>,

    /// Keep entries starting on or after this date (YYYY-MM-DD).
    #[arg(short = 'f', long)]
    pub from_date: Option<NaiveDate>,

    /// Keep entries starting on or before this date (YYYY-MM-DD).
    #[arg(short = 't', long)]
    pub to_date: Option<NaiveDate>,

    /// Timezone for emitted timestamps (IANA name or GMT offset).
    #[arg(long)]
    pub timezone: Option<String>,

    /// Toggl projects JSON file used to resolve client names.
    #[arg(short, long)]
    pub projects: Option<PathBuf>,
}

/// Arguments for `tp inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Input export file (Jiffy JSON or Toggl CSV).
    pub input: PathBuf,

    /// Source format; inferred from the input extension when omitted.
    #[arg(long, value_enum)]
    pub from: Option<SourceFormat>,

    /// Number of example entries to print.
    #[arg(short = 'n', long, default_value_t = 5)]
    pub examples: usize,

    /// Only count entries starting on or after this date (YYYY-MM-DD).
    #[arg(short = 'f', long)]
    pub from_date: Option<NaiveDate>,

    /// Only count entries starting on or before this date (YYYY-MM-DD).
    #[arg(short = 't', long)]
    pub to_date: Option<NaiveDate>,

    /// Timezone for displayed timestamps (IANA name or GMT offset).
    #[arg(long)]
    pub timezone: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_args_parse() {
        let cli = Cli::parse_from([
            "tp",
            "convert",
            "export.json",
            "--to",
            "clockify",
            "--email",
            "me@example.com",
            "-f",
            "2025-12-24",
            "-t",
            "2025-12-27",
            "--timezone",
            "Asia/Bangkok",
        ]);

        let Some(Commands::Convert(args)) = cli.command else {
            panic!("expected convert subcommand");
        };
        assert_eq!(args.to, TargetFormat::Clockify);
        assert_eq!(args.email.as_deref(), Some("me@example.com"));
        assert_eq!(args.from_date, Some("2025-12-24".parse().unwrap()));
        assert_eq!(args.to_date, Some("2025-12-27".parse().unwrap()));
        assert_eq!(args.timezone.as_deref(), Some("Asia/Bangkok"));
    }

    #[test]
    fn test_inspect_defaults_to_five_examples() {
        let cli = Cli::parse_from(["tp", "inspect", "export.json"]);
        let Some(Commands::Inspect(args)) = cli.command else {
            panic!("expected inspect subcommand");
        };
        assert_eq!(args.examples, 5);
    }
}
