pub mod enums;
pub mod error;
pub mod guidelines;
pub mod subject;

pub use enums::{BpStatus, BpType, Sex};
pub use error::{ModelError, Result};
pub use guidelines::{GuidelineEntry, guideline_table};
pub use subject::{MONTHS_PER_YEAR, PercentileResult, ReferenceCell, Subject};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guideline_table_covers_every_status() {
        let table = guideline_table();
        assert_eq!(table.len(), 3);
        assert_eq!(table[0].status, BpStatus::Normal);
        assert_eq!(table[2].status, BpStatus::Hypertension);
        assert!(table.iter().all(|entry| !entry.actions.is_empty()));
    }

    #[test]
    fn result_serializes() {
        let result = PercentileResult {
            bp_type: BpType::Systolic,
            bp_value_mmhg: 116.0,
            percentile: 79.5,
            z_score: 0.82,
            status: BpStatus::Normal,
            cell: ReferenceCell {
                age_years: 10,
                band: "50%".to_string(),
                height_cm: 141.0,
                bp_50: 110.0,
                bp_95: 122.0,
                sigma: 7.29,
            },
        };
        let json = serde_json::to_string(&result).expect("serialize result");
        let round: PercentileResult = serde_json::from_str(&json).expect("deserialize result");
        assert_eq!(round.status, BpStatus::Normal);
        assert_eq!(round.cell.band, "50%");
    }
}
