//! Cleaned NHANES examination extract.
//!
//! Only the columns the screening needs are read. Respondents older than
//! [`PEDIATRIC_MAX_AGE`] are dropped on load.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use pbp_model::{BpType, Sex, Subject};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{IngestError, Result};

/// Environment variable for overriding the cohort file location.
pub const NHANES_ENV_VAR: &str = "PBP_NHANES_FILE";

pub const PEDIATRIC_MAX_AGE: f64 = 13.0;

pub const SEQN: &str = "SEQN";
pub const AGE: &str = "RIDAGEYR";
pub const GENDER: &str = "RIAGENDR";
pub const HEIGHT: &str = "BMXHT";
pub const SYSTOLIC: &str = "BPXSY1";
pub const DIASTOLIC: &str = "BPXDI1";

const REQUIRED_COLUMNS: [&str; 6] = [SEQN, AGE, GENDER, HEIGHT, SYSTOLIC, DIASTOLIC];

/// Get the cohort file path.
///
/// Checks `PBP_NHANES_FILE` first, then falls back to
/// `nhanes/nhanes_clean.csv` at the workspace root.
pub fn default_cohort_path() -> PathBuf {
    if let Ok(path) = std::env::var(NHANES_ENV_VAR) {
        return PathBuf::from(path);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../nhanes/nhanes_clean.csv")
}

/// One respondent as recorded; measurements may be missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortRecord {
    pub seqn: u64,
    pub age_years: f64,
    /// Raw `RIAGENDR` code (1 = male, 2 = female).
    pub gender: String,
    pub height_cm: Option<f64>,
    pub systolic_mmhg: Option<f64>,
    pub diastolic_mmhg: Option<f64>,
}

/// A respondent with every value the screening needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompleteRecord {
    pub seqn: u64,
    pub sex: Sex,
    pub age_years: f64,
    pub height_cm: f64,
    pub systolic_mmhg: f64,
    pub diastolic_mmhg: f64,
}

impl CohortRecord {
    pub fn sex(&self) -> Result<Sex> {
        match parse_number(&self.gender) {
            Some(code) if code == 1.0 => Ok(Sex::Male),
            Some(code) if code == 2.0 => Ok(Sex::Female),
            _ => Err(IngestError::InvalidValue {
                seqn: self.seqn,
                field: GENDER,
                value: self.gender.clone(),
            }),
        }
    }

    pub fn complete(&self) -> Result<CompleteRecord> {
        let require = |value: Option<f64>, field: &'static str| {
            value.ok_or(IngestError::MissingMeasurement {
                seqn: self.seqn,
                field,
            })
        };
        Ok(CompleteRecord {
            seqn: self.seqn,
            sex: self.sex()?,
            age_years: self.age_years,
            height_cm: require(self.height_cm, HEIGHT)?,
            systolic_mmhg: require(self.systolic_mmhg, SYSTOLIC)?,
            diastolic_mmhg: require(self.diastolic_mmhg, DIASTOLIC)?,
        })
    }

    /// Systolic and diastolic queries for this respondent.
    pub fn subjects(&self) -> Result<[Subject; 2]> {
        let record = self.complete()?;
        Ok([
            Subject::new(
                record.sex,
                BpType::Systolic,
                record.age_years,
                record.height_cm,
                record.systolic_mmhg,
            )?,
            Subject::new(
                record.sex,
                BpType::Diastolic,
                record.age_years,
                record.height_cm,
                record.diastolic_mmhg,
            )?,
        ])
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cohort {
    records: BTreeMap<u64, CohortRecord>,
}

impl Cohort {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(IngestError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let cohort = Self::from_reader(bytes.as_slice(), path)?;
        info!(
            path = %path.display(),
            respondents = cohort.len(),
            "pediatric cohort loaded"
        );
        Ok(cohort)
    }

    /// Parse from any reader; `path` is only used in error messages.
    pub fn from_reader<R: std::io::Read>(reader: R, path: &Path) -> Result<Self> {
        let csv_error = |e: csv::Error| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = reader.headers().map_err(csv_error)?.clone();
        let mut columns = BTreeMap::new();
        for column in REQUIRED_COLUMNS {
            let idx = headers
                .iter()
                .position(|h| h.trim_matches('\u{feff}').trim().eq_ignore_ascii_case(column))
                .ok_or_else(|| IngestError::MissingColumn {
                    column: column.to_string(),
                    path: path.to_path_buf(),
                })?;
            columns.insert(column, idx);
        }
        let cell = |record: &csv::StringRecord, column: &str| -> String {
            columns
                .get(column)
                .and_then(|idx| record.get(*idx))
                .unwrap_or("")
                .trim()
                .to_string()
        };

        let mut records = BTreeMap::new();
        let mut skipped = 0usize;
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(csv_error)?;
            let row = line + 2;
            let Some(seqn) = parse_seqn(&cell(&record, SEQN)) else {
                warn!(row, "skipping cohort row with unparseable SEQN");
                skipped += 1;
                continue;
            };
            let Some(age_years) = parse_number(&cell(&record, AGE)) else {
                warn!(row, seqn, "skipping cohort row with missing age");
                skipped += 1;
                continue;
            };
            if age_years > PEDIATRIC_MAX_AGE {
                continue;
            }
            if records.contains_key(&seqn) {
                warn!(row, seqn, "duplicate SEQN; keeping the first row");
                continue;
            }
            records.insert(
                seqn,
                CohortRecord {
                    seqn,
                    age_years,
                    gender: cell(&record, GENDER),
                    height_cm: parse_number(&cell(&record, HEIGHT)),
                    systolic_mmhg: parse_number(&cell(&record, SYSTOLIC)),
                    diastolic_mmhg: parse_number(&cell(&record, DIASTOLIC)),
                },
            );
        }
        if skipped > 0 {
            warn!(skipped, path = %path.display(), "cohort rows skipped");
        }
        Ok(Self { records })
    }

    /// Respondent ids, ascending.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.records.keys().copied()
    }

    pub fn get(&self, seqn: u64) -> Result<&CohortRecord> {
        self.records
            .get(&seqn)
            .ok_or(IngestError::UnknownRespondent { seqn })
    }

    pub fn records(&self) -> impl Iterator<Item = &CohortRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// SEQN is sometimes exported as a float ("83732.0").
fn parse_seqn(raw: &str) -> Option<u64> {
    let value = parse_number(raw)?;
    if value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return None;
    }
    Some(value as u64)
}
