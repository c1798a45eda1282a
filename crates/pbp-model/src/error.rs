use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("unknown sex '{0}' (expected Male or Female)")]
    UnknownSex(String),
    #[error("unknown blood pressure type '{0}' (expected Systolic or Diastolic)")]
    UnknownBpType(String),
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
