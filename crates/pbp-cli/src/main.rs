//! Pediatric blood pressure percentile CLI.

use clap::{ColorChoice, Parser};
use pbp_cli::logging::{LogConfig, LogFormat, init_logging};
use pbp_core::PercentileError;
use std::io::{self, IsTerminal};
use tracing::error;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_guidelines, run_patient, run_patients, run_percentile, run_tables};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let tables_dir = cli.tables_dir.as_ref();
    let result = match &cli.command {
        Command::Percentile(args) => run_percentile(args, tables_dir),
        Command::Patient(args) => run_patient(args, tables_dir),
        Command::Patients(args) => run_patients(args),
        Command::Tables(args) => run_tables(args, tables_dir),
        Command::Guidelines => {
            run_guidelines();
            Ok(())
        }
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            report_error(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

/// Input problems get the plain message; anything else the full chain.
fn report_error(error: &anyhow::Error) {
    let user_error = error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<PercentileError>())
        .any(PercentileError::is_user_error);
    if user_error {
        eprintln!("error: {error}");
    } else {
        error!(error = %format!("{error:#}"), "command failed");
        eprintln!("error: {error:#}");
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
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
