//! Error taxonomy for percentile computation.

use pbp_model::ModelError;
use pbp_standards::StandardsError;
use thiserror::Error;

/// Broad category of a [`PercentileError`], for callers that only need to
/// decide how to present a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller bug: an unsupported sex / BP-type combination.
    Configuration,
    /// The subject is outside the ages the reference tables cover.
    OutOfRange,
    /// The reference data is corrupt.
    DataIntegrity,
    /// Measurements that can never be valid (zero, negative, NaN).
    InvalidInput,
}

#[derive(Debug, Error)]
pub enum PercentileError {
    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("age {age_years} years is outside the supported range ({supported})")]
    OutOfRange { age_years: f64, supported: String },

    #[error("reference data integrity error in {table}: {message}")]
    DataIntegrity { table: String, message: String },

    #[error("invalid input: {0}")]
    InvalidInput(#[source] ModelError),
}

impl PercentileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::DataIntegrity { .. } => ErrorKind::DataIntegrity,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// True when the message is meant for the person filling in the form
    /// rather than for whoever maintains the deployment.
    pub fn is_user_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfRange | ErrorKind::InvalidInput)
    }

    pub(crate) fn integrity(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataIntegrity {
            table: table.into(),
            message: message.into(),
        }
    }
}

impl From<ModelError> for PercentileError {
    fn from(error: ModelError) -> Self {
        match error {
            ModelError::UnknownSex(_) | ModelError::UnknownBpType(_) => Self::Configuration {
                message: error.to_string(),
            },
            ModelError::NonFinite { .. } | ModelError::NonPositive { .. } => {
                Self::InvalidInput(error)
            }
        }
    }
}

impl From<StandardsError> for PercentileError {
    fn from(error: StandardsError) -> Self {
        match error {
            StandardsError::InvalidTable { table, message } => Self::DataIntegrity { table, message },
            other if other.is_integrity_error() => Self::DataIntegrity {
                table: "reference tables".to_string(),
                message: other.to_string(),
            },
            other => Self::Configuration {
                message: other.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, PercentileError>;
