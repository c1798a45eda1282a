#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use pbp_model::{BpType, Sex};
use serde::{Deserialize, Serialize};

pub const MANIFEST_FILE: &str = "manifest.toml";
pub const MANIFEST_SCHEMA: &str = "pbp.reference-tables";
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest: ManifestHeader,
    #[serde(default)]
    pub notes: Option<ManifestNotes>,
    #[serde(default)]
    pub pins: Option<Pins>,
    pub files: Vec<ManifestFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestNotes {
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pins {
    /// Clinical guideline the tables were transcribed from.
    pub guideline: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    pub path: String,
    pub sha256: String,
    pub role: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One of the four (sex, BP type) tables a complete directory provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub enum TableRole {
    MaleSystolic,
    MaleDiastolic,
    FemaleSystolic,
    FemaleDiastolic,
}

impl TableRole {
    pub const ALL: [TableRole; 4] = [
        TableRole::MaleSystolic,
        TableRole::MaleDiastolic,
        TableRole::FemaleSystolic,
        TableRole::FemaleDiastolic,
    ];

    pub fn from_key(sex: Sex, bp_type: BpType) -> Self {
        match (sex, bp_type) {
            (Sex::Male, BpType::Systolic) => TableRole::MaleSystolic,
            (Sex::Male, BpType::Diastolic) => TableRole::MaleDiastolic,
            (Sex::Female, BpType::Systolic) => TableRole::FemaleSystolic,
            (Sex::Female, BpType::Diastolic) => TableRole::FemaleDiastolic,
        }
    }

    pub fn sex(&self) -> Sex {
        match self {
            TableRole::MaleSystolic | TableRole::MaleDiastolic => Sex::Male,
            TableRole::FemaleSystolic | TableRole::FemaleDiastolic => Sex::Female,
        }
    }

    pub fn bp_type(&self) -> BpType {
        match self {
            TableRole::MaleSystolic | TableRole::FemaleSystolic => BpType::Systolic,
            TableRole::MaleDiastolic | TableRole::FemaleDiastolic => BpType::Diastolic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TableRole::MaleSystolic => "male_systolic",
            TableRole::MaleDiastolic => "male_diastolic",
            TableRole::FemaleSystolic => "female_systolic",
            TableRole::FemaleDiastolic => "female_diastolic",
        }
    }

    /// File name used when the directory has no manifest.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            TableRole::MaleSystolic => "MaleSBP.csv",
            TableRole::MaleDiastolic => "MaleDBP.csv",
            TableRole::FemaleSystolic => "FemaleSBP.csv",
            TableRole::FemaleDiastolic => "FemaleDBP.csv",
        }
    }
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<TableRole> for String {
    fn from(role: TableRole) -> Self {
        role.as_str().to_string()
    }
}

impl FromStr for TableRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableRole::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown table role: {s}"))
    }
}
