//! Error types for cohort ingestion.

use std::path::PathBuf;

use pbp_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Cohort file not found.
    #[error("cohort file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Required column not found in the cohort file.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("respondent {seqn} is not in the pediatric cohort")]
    UnknownRespondent { seqn: u64 },

    #[error("respondent {seqn} has no {field} measurement")]
    MissingMeasurement { seqn: u64, field: &'static str },

    #[error("respondent {seqn} has invalid {field} value '{value}'")]
    InvalidValue {
        seqn: u64,
        field: &'static str,
        value: String,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
