//! Statbank command line tool.

use clap::{ColorChoice, Parser};
use statbank_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_describe, run_parse, run_payload, run_round, run_template, run_validate,
};
use crate::summary::{print_description, print_payload, print_report, print_written};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli.command) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: Command) -> anyhow::Result<i32> {
    match command {
        Command::Parse(args) => {
            let (description, path) = run_parse(&args)?;
            print_description(&description);
            println!("Saved to {}", commands::display_path(&path));
            Ok(0)
        }
        Command::Describe(args) => {
            let description = run_describe(&args)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&description)?);
            } else {
                print_description(&description);
            }
            Ok(0)
        }
        Command::Template(args) => {
            print_written(&run_template(&args)?);
            Ok(0)
        }
        Command::Validate(args) => {
            let report = run_validate(&args.data)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report, args.show_info);
            }
            Ok(i32::from(report.has_errors()))
        }
        Command::Round(args) => {
            print_written(&run_round(&args)?);
            Ok(0)
        }
        Command::Payload(args) => {
            print_payload(&run_payload(&args)?);
            Ok(0)
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
