#![deny(unsafe_code)]

//! In-memory reference tables.
//!
//! A table holds, for each integer age, a row of height bands. Each band
//! carries the band height and the 50th/95th percentile blood pressure at
//! that height. Tables are validated on construction and never mutated.

use std::collections::BTreeMap;

use pbp_model::{BpType, Sex};
use serde::Serialize;

use crate::error::StandardsError;
use crate::manifest::TableRole;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeightBand {
    /// Column header in the source file.
    pub label: String,
    pub height_cm: f64,
    pub bp_50: f64,
    pub bp_95: f64,
}

impl HeightBand {
    pub fn new(label: impl Into<String>, height_cm: f64, bp_50: f64, bp_95: f64) -> Self {
        Self {
            label: label.into(),
            height_cm,
            bp_50,
            bp_95,
        }
    }
}

/// All height bands for one age, ascending by height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeGroup {
    age_years: u8,
    bands: Vec<HeightBand>,
}

impl AgeGroup {
    pub fn new(age_years: u8, bands: Vec<HeightBand>) -> Result<Self, String> {
        if bands.is_empty() {
            return Err(format!("age {age_years} has no height bands"));
        }
        for band in &bands {
            for (what, value) in [
                ("height", band.height_cm),
                ("50th", band.bp_50),
                ("95th", band.bp_95),
            ] {
                if !value.is_finite() {
                    return Err(format!(
                        "age {age_years} band '{}' has non-finite {what} value",
                        band.label
                    ));
                }
            }
        }
        for pair in bands.windows(2) {
            if pair[1].height_cm <= pair[0].height_cm {
                return Err(format!(
                    "age {age_years} heights are not strictly increasing ({} then {})",
                    pair[0].height_cm, pair[1].height_cm
                ));
            }
        }
        Ok(Self { age_years, bands })
    }

    pub fn age_years(&self) -> u8 {
        self.age_years
    }

    pub fn bands(&self) -> &[HeightBand] {
        &self.bands
    }

    /// Band whose height is closest to `height_cm`.
    ///
    /// Bands are scanned in ascending height order and only a strictly
    /// smaller distance replaces the current pick, so an exact tie resolves
    /// to the shorter band.
    pub fn nearest(&self, height_cm: f64) -> Option<&HeightBand> {
        let mut best: Option<(&HeightBand, f64)> = None;
        for band in &self.bands {
            let distance = (band.height_cm - height_cm).abs();
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((band, distance)),
            }
        }
        best.map(|(band, _)| band)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceTable {
    sex: Sex,
    bp_type: BpType,
    source: String,
    groups: BTreeMap<u8, AgeGroup>,
}

impl ReferenceTable {
    pub fn new(
        sex: Sex,
        bp_type: BpType,
        source: impl Into<String>,
        groups: Vec<AgeGroup>,
    ) -> Result<Self, StandardsError> {
        let source = source.into();
        if groups.is_empty() {
            return Err(StandardsError::invalid_table(&source, "table has no age groups"));
        }
        let mut by_age = BTreeMap::new();
        for group in groups {
            let age = group.age_years;
            if by_age.insert(age, group).is_some() {
                return Err(StandardsError::invalid_table(
                    &source,
                    format!("duplicate age group {age}"),
                ));
            }
        }
        Ok(Self {
            sex,
            bp_type,
            source,
            groups: by_age,
        })
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn bp_type(&self) -> BpType {
        self.bp_type
    }

    pub fn role(&self) -> TableRole {
        TableRole::from_key(self.sex, self.bp_type)
    }

    /// Where the table came from (file name, or a label for synthetic tables).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn age_group(&self, age_years: u8) -> Option<&AgeGroup> {
        self.groups.get(&age_years)
    }

    pub fn age_groups(&self) -> impl Iterator<Item = &AgeGroup> {
        self.groups.values()
    }

    pub fn ages(&self) -> impl Iterator<Item = u8> + '_ {
        self.groups.keys().copied()
    }

    pub fn age_range(&self) -> Option<(u8, u8)> {
        let min = self.groups.keys().next()?;
        let max = self.groups.keys().next_back()?;
        Some((*min, *max))
    }

    pub fn band_count(&self) -> usize {
        self.groups.values().map(|group| group.bands.len()).sum()
    }
}
