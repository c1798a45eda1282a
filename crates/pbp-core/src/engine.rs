//! Percentile lookup against the reference tables.
//!
//! For one subject the engine picks the (sex, BP type) table, the age group
//! for the rounded age, the nearest height band within it, fits a normal
//! distribution to that band's 50th/95th anchors, and reads the subject's
//! percentile off its CDF.

use pbp_model::{PercentileResult, ReferenceCell, Subject};
use pbp_standards::{ReferenceTable, ReferenceTableStore};
use tracing::debug;

use crate::classify::classify;
use crate::distribution::ReferenceDistribution;
use crate::error::{PercentileError, Result};

/// Stateless view over an immutable table store. Cheap to construct per
/// request; any number of engines may share one store.
#[derive(Debug, Clone, Copy)]
pub struct PercentileEngine<'a> {
    store: &'a ReferenceTableStore,
}

impl<'a> PercentileEngine<'a> {
    pub fn new(store: &'a ReferenceTableStore) -> Self {
        Self { store }
    }

    pub fn compute_percentile(&self, subject: &Subject) -> Result<PercentileResult> {
        let (cell, distribution) = self.resolve(subject)?;
        let percentile = distribution.percentile(subject.bp_value_mmhg);
        let z_score = distribution.z_score(subject.bp_value_mmhg);
        let status = classify(percentile);
        debug!(
            sex = %subject.sex,
            bp_type = %subject.bp_type,
            age_group = cell.age_years,
            band = %cell.band,
            status = %status,
            "percentile computed"
        );
        Ok(PercentileResult {
            bp_type: subject.bp_type,
            bp_value_mmhg: subject.bp_value_mmhg,
            percentile,
            z_score,
            status,
            cell,
        })
    }

    /// Reference cell the subject falls into, without evaluating the reading.
    pub fn resolve_cell(&self, subject: &Subject) -> Result<ReferenceCell> {
        self.resolve(subject).map(|(cell, _)| cell)
    }

    fn resolve(&self, subject: &Subject) -> Result<(ReferenceCell, ReferenceDistribution)> {
        subject.validate()?;
        let table = self.store.get_table(subject.sex, subject.bp_type)?;
        let age = group_age(subject.age_years, table)?;
        let group = table
            .age_group(age)
            .ok_or_else(|| out_of_range(subject.age_years, table))?;
        let band = group.nearest(subject.height_cm).ok_or_else(|| {
            PercentileError::integrity(table.source(), format!("age {age} has no height bands"))
        })?;
        let distribution = ReferenceDistribution::from_anchors(band.bp_50, band.bp_95).map_err(
            |message| {
                PercentileError::integrity(
                    table.source(),
                    format!("age {age} band '{}': {message}", band.label),
                )
            },
        )?;
        let cell = ReferenceCell {
            age_years: age,
            band: band.label.clone(),
            height_cm: band.height_cm,
            bp_50: band.bp_50,
            bp_95: band.bp_95,
            sigma: distribution.sigma(),
        };
        Ok((cell, distribution))
    }
}

/// Convenience wrapper for one-off lookups.
pub fn compute_percentile(
    store: &ReferenceTableStore,
    subject: &Subject,
) -> Result<PercentileResult> {
    PercentileEngine::new(store).compute_percentile(subject)
}

/// Age group key for a (possibly fractional) age. Rounds half to even, so
/// 12.5 selects 12 and 13.5 selects 14.
fn group_age(age_years: f64, table: &ReferenceTable) -> Result<u8> {
    let rounded = age_years.round_ties_even();
    if !(0.0..=f64::from(u8::MAX)).contains(&rounded) {
        return Err(out_of_range(age_years, table));
    }
    Ok(rounded as u8)
}

fn out_of_range(age_years: f64, table: &ReferenceTable) -> PercentileError {
    let supported = match table.age_range() {
        Some((min, max)) => format!("{min}-{max} years"),
        None => "no ages".to_string(),
    };
    PercentileError::OutOfRange {
        age_years,
        supported,
    }
}

#[cfg(test)]
mod tests {
    use pbp_model::{BpType, Sex};
    use pbp_standards::{AgeGroup, HeightBand};

    use super::*;

    fn store_with(bands: Vec<HeightBand>) -> ReferenceTableStore {
        let group = AgeGroup::new(7, bands).unwrap();
        let table = ReferenceTable::new(Sex::Male, BpType::Systolic, "unit", vec![group]).unwrap();
        ReferenceTableStore::from_tables(vec![table]).unwrap()
    }

    #[test]
    fn rounding_is_half_to_even() {
        let store = store_with(vec![HeightBand::new("a", 120.0, 100.0, 112.0)]);
        let table = store.get_table(Sex::Male, BpType::Systolic).unwrap();
        assert_eq!(group_age(6.5, table).unwrap(), 6);
        assert_eq!(group_age(7.5, table).unwrap(), 8);
        assert_eq!(group_age(7.49, table).unwrap(), 7);
        assert!(group_age(-0.6, table).is_err());
        assert_eq!(group_age(-0.4, table).unwrap(), 0);
    }

    #[test]
    fn degenerate_anchor_is_integrity_error() {
        let store = store_with(vec![HeightBand::new("flat", 120.0, 100.0, 100.0)]);
        let subject = Subject::new(Sex::Male, BpType::Systolic, 7.0, 121.0, 100.0).unwrap();
        let err = compute_percentile(&store, &subject).unwrap_err();
        assert!(matches!(err, PercentileError::DataIntegrity { .. }));
        assert!(err.to_string().contains("band 'flat'"));
    }

    #[test]
    fn out_of_range_names_supported_ages() {
        let store = store_with(vec![HeightBand::new("a", 120.0, 100.0, 112.0)]);
        let subject = Subject::new(Sex::Male, BpType::Systolic, 9.0, 121.0, 100.0).unwrap();
        let err = compute_percentile(&store, &subject).unwrap_err();
        assert_eq!(
            err.to_string(),
            "age 9 years is outside the supported range (7-7 years)"
        );
    }
}
