//! NHANES cohort ingestion.
//!
//! Reads the cleaned examination extract and exposes pediatric respondents
//! by `SEQN` for screening.

#![deny(unsafe_code)]

pub mod cohort;
pub mod error;

pub use cohort::{
    Cohort, CohortRecord, CompleteRecord, NHANES_ENV_VAR, PEDIATRIC_MAX_AGE, default_cohort_path,
};
pub use error::{IngestError, Result};
