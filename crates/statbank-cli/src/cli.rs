//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use statbank_transfer::Approve;

#[derive(Parser)]
#[command(
    name = "statbank",
    version,
    about = "Check and prepare statbank table uploads",
    long_about = "Parse statbank table descriptions, validate datasets against them \
                  and prepare rounded upload files.\n\n\
                  Data files are delimited text, one per subtable, given in the \
                  subtable order of the description."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a raw extraction description and save it for offline use.
    Parse(ParseArgs),

    /// Show subtables, columns and codelists of a description.
    Describe(DescribeArgs),

    /// Write one header-only data file per subtable.
    Template(TemplateArgs),

    /// Validate data files against a description.
    Validate(ValidateArgs),

    /// Round statistics to their stored decimals and write upload files.
    Round(RoundArgs),

    /// Build the upload body and parameters without sending anything.
    Payload(PayloadArgs),
}

#[derive(Args)]
pub struct ParseArgs {
    /// Raw description JSON as delivered by the statbank.
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Where to save the parsed description (default: table_<id>.json).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct DescribeArgs {
    /// Raw or saved description.
    #[arg(value_name = "DESCRIPTION")]
    pub description: PathBuf,

    /// Print the description as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct TemplateArgs {
    /// Raw or saved description.
    #[arg(value_name = "DESCRIPTION")]
    pub description: PathBuf,

    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Field separator (a single ASCII character).
    #[arg(long = "separator", default_value = ";", value_parser = parse_separator)]
    pub separator: u8,
}

/// Description plus data files, shared by the data commands.
#[derive(Args)]
pub struct DataArgs {
    /// Raw or saved description.
    #[arg(value_name = "DESCRIPTION")]
    pub description: PathBuf,

    /// One data file per subtable, in subtable order.
    #[arg(value_name = "DATA", required = true)]
    pub data: Vec<PathBuf>,

    /// Field separator of the data files (a single ASCII character).
    #[arg(long = "separator", default_value = ";", value_parser = parse_separator)]
    pub separator: u8,

    /// Data files have no header row.
    #[arg(long = "no-header")]
    pub no_header: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Print the report as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,

    /// Also list info findings.
    #[arg(long = "show-info")]
    pub show_info: bool,
}

#[derive(Args)]
pub struct RoundArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output directory for the rounded files (default: ./rounded).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct PayloadArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Three-letter initials of the responsible user (default: $STATBANK_SHORTUSER).
    #[arg(long = "shortuser", value_name = "INITIALS")]
    pub shortuser: Option<String>,

    /// Publishing date, YYYY-MM-DD (default: tomorrow).
    #[arg(long = "publish-date", value_name = "DATE")]
    pub publish_date: Option<NaiveDate>,

    /// Approval mode: manual, automatic or jit.
    #[arg(long = "approve", value_enum, default_value = "jit")]
    pub approve: ApproveArg,

    /// Do not overwrite data already loaded for the same period.
    #[arg(long = "no-overwrite")]
    pub no_overwrite: bool,

    /// Upload even when validation finds errors.
    #[arg(long = "override-validation")]
    pub override_validation: bool,

    /// Write the body here (default: print to stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ApproveArg {
    Manual,
    Automatic,
    Jit,
}

impl From<ApproveArg> for Approve {
    fn from(value: ApproveArg) -> Self {
        match value {
            ApproveArg::Manual => Approve::Manual,
            ApproveArg::Automatic => Approve::Automatic,
            ApproveArg::Jit => Approve::Jit,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_separator(value: &str) -> Result<u8, String> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ if value == "\\t" => Ok(b'\t'),
        _ => Err(format!("separator must be one ASCII character, got '{value}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn separator_parsing() {
        assert_eq!(parse_separator(";"), Ok(b';'));
        assert_eq!(parse_separator(","), Ok(b','));
        assert_eq!(parse_separator("\\t"), Ok(b'\t'));
        assert!(parse_separator(";;").is_err());
        assert!(parse_separator("ø").is_err());
    }

    #[test]
    fn validate_takes_data_files_in_order() {
        let cli = Cli::try_parse_from([
            "statbank",
            "validate",
            "table.json",
            "fylke.csv",
            "land.csv",
            "--separator",
            ",",
            "--no-header",
        ])
        .expect("parse args");
        let Command::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.data.data.len(), 2);
        assert_eq!(args.data.separator, b',');
        assert!(args.data.no_header);
        assert!(!args.json);
    }

    #[test]
    fn data_files_are_required() {
        assert!(Cli::try_parse_from(["statbank", "round", "table.json"]).is_err());
    }
}
