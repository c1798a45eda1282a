#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::enums::{BpStatus, BpType, Sex};
use crate::error::{ModelError, Result};

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// One percentile query: a single blood pressure reading of one child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub sex: Sex,
    pub bp_type: BpType,
    /// Age in years; fractional when converted from months.
    pub age_years: f64,
    pub height_cm: f64,
    pub bp_value_mmhg: f64,
}

impl Subject {
    pub fn new(
        sex: Sex,
        bp_type: BpType,
        age_years: f64,
        height_cm: f64,
        bp_value_mmhg: f64,
    ) -> Result<Self> {
        let subject = Self {
            sex,
            bp_type,
            age_years,
            height_cm,
            bp_value_mmhg,
        };
        subject.validate()?;
        Ok(subject)
    }

    pub fn from_age_months(
        sex: Sex,
        bp_type: BpType,
        age_months: f64,
        height_cm: f64,
        bp_value_mmhg: f64,
    ) -> Result<Self> {
        Self::new(
            sex,
            bp_type,
            age_months / MONTHS_PER_YEAR,
            height_cm,
            bp_value_mmhg,
        )
    }

    /// Check measurement sanity. Age range is not checked here: whether an
    /// age is supported depends on the reference table in use.
    pub fn validate(&self) -> Result<()> {
        require_finite("age_years", self.age_years)?;
        require_positive("height_cm", self.height_cm)?;
        require_positive("bp_value_mmhg", self.bp_value_mmhg)?;
        Ok(())
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::NonFinite { field, value })
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<()> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ModelError::NonPositive { field, value })
    }
}

/// The reference cell a percentile was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCell {
    pub age_years: u8,
    /// Header of the height band column in the source table.
    pub band: String,
    pub height_cm: f64,
    pub bp_50: f64,
    pub bp_95: f64,
    pub sigma: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileResult {
    pub bp_type: BpType,
    pub bp_value_mmhg: f64,
    /// Percentile rank in `[0, 100]`.
    pub percentile: f64,
    pub z_score: f64,
    pub status: BpStatus,
    pub cell: ReferenceCell,
}
