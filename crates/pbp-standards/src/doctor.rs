#![deny(unsafe_code)]

use crate::store::{ReferenceTableStore, VerifySummary};

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub verified: bool,
    pub guideline: Option<String>,
    pub counts: DoctorCounts,
    pub tables: Vec<TableSummary>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorCounts {
    pub tables: usize,
    pub age_groups: usize,
    pub height_bands: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct TableSummary {
    pub role: String,
    pub source: String,
    pub min_age: Option<u8>,
    pub max_age: Option<u8>,
    pub age_groups: usize,
    pub height_bands: usize,
}

impl DoctorReport {
    pub fn from_store(store: &ReferenceTableStore, summary: &VerifySummary) -> Self {
        let tables = store
            .tables()
            .map(|table| {
                let range = table.age_range();
                TableSummary {
                    role: table.role().to_string(),
                    source: table.source().to_string(),
                    min_age: range.map(|(min, _)| min),
                    max_age: range.map(|(_, max)| max),
                    age_groups: table.age_groups().count(),
                    height_bands: table.band_count(),
                }
            })
            .collect();
        Self {
            schema: "pbp.tables-doctor".to_string(),
            schema_version: 1,
            verified: summary.verified,
            guideline: summary.guideline.clone(),
            counts: DoctorCounts {
                tables: summary.table_count,
                age_groups: summary.age_group_count,
                height_bands: summary.band_count,
            },
            tables,
        }
    }
}
