//! CLI argument definitions for `pbp`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use pbp_model::Sex;

#[derive(Parser)]
#[command(
    name = "pbp",
    version,
    about = "Pediatric blood pressure percentile screening",
    long_about = "Estimate the blood pressure percentile of a child from sex, age and height.\n\n\
                  Readings are compared with the 50th and 95th percentile anchors of the\n\
                  pediatric reference tables and classified as Normal, Elevated or Hypertension."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Allow patient measurements to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Directory holding the reference tables (default: $PBP_TABLES_DIR or bp-tables/).
    #[arg(long = "tables-dir", value_name = "DIR", global = true)]
    pub tables_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute systolic and diastolic percentiles for one child.
    Percentile(PercentileArgs),

    /// Screen a respondent from the NHANES cohort.
    Patient(PatientArgs),

    /// List pediatric respondent ids in the NHANES cohort.
    Patients(CohortArgs),

    /// Verify and summarize the loaded reference tables.
    Tables(FormatArgs),

    /// Show recommended follow-up for each status.
    Guidelines,
}

#[derive(Parser)]
pub struct PercentileArgs {
    #[arg(long = "sex", value_enum)]
    pub sex: SexArg,

    /// Age in years.
    #[arg(
        long = "age",
        value_name = "YEARS",
        conflicts_with = "age_months",
        required_unless_present = "age_months"
    )]
    pub age: Option<f64>,

    /// Age in months (converted to years).
    #[arg(long = "age-months", value_name = "MONTHS")]
    pub age_months: Option<f64>,

    /// Height in centimetres.
    #[arg(long = "height", value_name = "CM")]
    pub height: f64,

    /// Systolic reading in mmHg.
    #[arg(long = "systolic", value_name = "MMHG")]
    pub systolic: f64,

    /// Diastolic reading in mmHg.
    #[arg(long = "diastolic", value_name = "MMHG")]
    pub diastolic: f64,

    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Parser)]
pub struct CohortArgs {
    /// Cleaned NHANES extract (default: $PBP_NHANES_FILE or nhanes/nhanes_clean.csv).
    #[arg(long = "nhanes", value_name = "PATH")]
    pub nhanes: Option<PathBuf>,
}

#[derive(Parser)]
pub struct PatientArgs {
    /// Respondent sequence number.
    #[arg(value_name = "SEQN")]
    pub seqn: u64,

    #[command(flatten)]
    pub cohort: CohortArgs,

    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Parser)]
pub struct FormatArgs {
    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SexArg {
    Male,
    Female,
}

impl From<SexArg> for Sex {
    fn from(value: SexArg) -> Self {
        match value {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
