//! Type-safe enumerations for the reference-table dimensions and the
//! clinical status buckets.
//!
//! The dashboard form and the reference files spell these values in a few
//! different ways ("Male", "M", "Systolic BP", "SBP"); parsing accepts all of
//! them case-insensitively and `as_str` always returns the canonical name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Biological sex used to select the reference population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }

    /// Single-letter code used by cohort extracts and chart encodings.
    pub fn code(&self) -> char {
        match self {
            Sex::Male => 'M',
            Sex::Female => 'F',
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MALE" | "M" | "BOY" => Ok(Sex::Male),
            "FEMALE" | "F" | "GIRL" => Ok(Sex::Female),
            _ => Err(ModelError::UnknownSex(s.to_string())),
        }
    }
}

/// Which of the two blood pressure readings a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BpType {
    Systolic,
    Diastolic,
}

impl BpType {
    pub const ALL: [BpType; 2] = [BpType::Systolic, BpType::Diastolic];

    pub fn as_str(&self) -> &'static str {
        match self {
            BpType::Systolic => "Systolic",
            BpType::Diastolic => "Diastolic",
        }
    }

    /// Label used on chart legends and tooltips ("Systolic BP").
    pub fn display_label(&self) -> &'static str {
        match self {
            BpType::Systolic => "Systolic BP",
            BpType::Diastolic => "Diastolic BP",
        }
    }
}

impl fmt::Display for BpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BpType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SYSTOLIC" | "SYSTOLIC BP" | "SBP" => Ok(BpType::Systolic),
            "DIASTOLIC" | "DIASTOLIC BP" | "DBP" => Ok(BpType::Diastolic),
            _ => Err(ModelError::UnknownBpType(s.to_string())),
        }
    }
}

/// Clinical status bucket derived from a percentile.
///
/// Ordered by severity, so `Normal < Elevated < Hypertension`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BpStatus {
    Normal,
    Elevated,
    Hypertension,
}

impl BpStatus {
    pub const ALL: [BpStatus; 3] = [BpStatus::Normal, BpStatus::Elevated, BpStatus::Hypertension];

    pub fn as_str(&self) -> &'static str {
        match self {
            BpStatus::Normal => "Normal",
            BpStatus::Elevated => "Elevated",
            BpStatus::Hypertension => "Hypertension",
        }
    }

    /// Label shown in tooltips and the guideline table.
    pub fn label(&self) -> &'static str {
        match self {
            BpStatus::Normal => "Normal BP",
            BpStatus::Elevated => "Elevated BP",
            BpStatus::Hypertension => "Hypertension",
        }
    }

    /// Colour of the chart point for this status.
    pub fn chart_color(&self) -> &'static str {
        match self {
            BpStatus::Normal => "darkgreen",
            BpStatus::Elevated => "darkgoldenrod",
            BpStatus::Hypertension => "red",
        }
    }
}

impl fmt::Display for BpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NORMAL" | "NORMAL BP" => Ok(BpStatus::Normal),
            "ELEVATED" | "ELEVATED BP" => Ok(BpStatus::Elevated),
            "HYPERTENSION" => Ok(BpStatus::Hypertension),
            _ => Err(format!("Unknown blood pressure status: {s}")),
        }
    }
}
