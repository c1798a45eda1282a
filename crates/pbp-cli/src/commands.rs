use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use pbp_cli::logging::redact_value;
use pbp_cli::summary::{guideline_actions_table, print_doctor, print_screening};
use pbp_core::{ScreeningReport, ScreeningRequest, screen};
use pbp_ingest::{Cohort, default_cohort_path};
use pbp_model::{BpStatus, MONTHS_PER_YEAR};
use pbp_standards::{DoctorReport, ReferenceTableStore, VerifySummary, tables_root};

use crate::cli::{CohortArgs, FormatArgs, OutputFormatArg, PatientArgs, PercentileArgs};

fn load_store(tables_dir: Option<&PathBuf>) -> Result<(ReferenceTableStore, VerifySummary)> {
    let dir = tables_dir.cloned().unwrap_or_else(tables_root);
    ReferenceTableStore::load_dir(&dir)
        .with_context(|| format!("load reference tables from {}", dir.display()))
}

fn load_cohort(args: &CohortArgs) -> Result<Cohort> {
    let path = args.nhanes.clone().unwrap_or_else(default_cohort_path);
    Cohort::load(&path).with_context(|| format!("load NHANES cohort from {}", path.display()))
}

pub fn run_percentile(args: &PercentileArgs, tables_dir: Option<&PathBuf>) -> Result<()> {
    let span = info_span!("percentile");
    let _guard = span.enter();
    let age_years = match (args.age, args.age_months) {
        (Some(years), _) => years,
        (None, Some(months)) => months / MONTHS_PER_YEAR,
        (None, None) => anyhow::bail!("either --age or --age-months is required"),
    };
    let request = ScreeningRequest {
        sex: args.sex.into(),
        age_years,
        height_cm: args.height,
        systolic_mmhg: args.systolic,
        diastolic_mmhg: args.diastolic,
    };
    let (store, _) = load_store(tables_dir)?;
    let report = screen(&store, &request)?;
    log_report(&report);
    emit_report(&report, args.output.format)
}

pub fn run_patient(args: &PatientArgs, tables_dir: Option<&PathBuf>) -> Result<()> {
    let seqn = args.seqn.to_string();
    let span = info_span!("patient", seqn = %redact_value(&seqn));
    let _guard = span.enter();
    let cohort = load_cohort(&args.cohort)?;
    let record = cohort.get(args.seqn)?.complete()?;
    let request = ScreeningRequest {
        sex: record.sex,
        age_years: record.age_years,
        height_cm: record.height_cm,
        systolic_mmhg: record.systolic_mmhg,
        diastolic_mmhg: record.diastolic_mmhg,
    };
    let (store, _) = load_store(tables_dir)?;
    let report = screen(&store, &request)?;
    log_report(&report);
    if args.output.format == OutputFormatArg::Table {
        println!("Respondent: {}", args.seqn);
    }
    emit_report(&report, args.output.format)
}

pub fn run_patients(args: &CohortArgs) -> Result<()> {
    let cohort = load_cohort(args)?;
    for seqn in cohort.ids() {
        println!("{seqn}");
    }
    Ok(())
}

pub fn run_tables(args: &FormatArgs, tables_dir: Option<&PathBuf>) -> Result<()> {
    let span = info_span!("tables");
    let _guard = span.enter();
    let (store, summary) = load_store(tables_dir)?;
    let report = DoctorReport::from_store(&store, &summary);
    match args.format {
        OutputFormatArg::Table => print_doctor(&report),
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize doctor report")?;
            println!("{json}");
        }
    }
    Ok(())
}

pub fn run_guidelines() {
    println!("{}", guideline_actions_table(&BpStatus::ALL));
}

fn emit_report(report: &ScreeningReport, format: OutputFormatArg) -> Result<()> {
    match format {
        OutputFormatArg::Table => print_screening(report),
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(report).context("serialize screening report")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn log_report(report: &ScreeningReport) {
    for result in report.results() {
        let value = result.bp_value_mmhg.to_string();
        let percentile = format!("{:.1}", result.percentile);
        info!(
            bp_type = %result.bp_type,
            value_mmhg = %redact_value(&value),
            percentile = %redact_value(&percentile),
            status = %result.status,
            "reading classified"
        );
    }
}
