#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use pbp_model::{BpType, Sex};
use tracing::debug;

use crate::error::StandardsError;
use crate::table::{AgeGroup, HeightBand, ReferenceTable};

pub const AGE_COLUMN: &str = "Age (y)";
pub const DATA_COLUMN: &str = "Data";

/// Row discriminator in the `Data` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Metric {
    Height,
    P50,
    P95,
}

impl Metric {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "height (cm)" | "height" => Some(Metric::Height),
            "50th" => Some(Metric::P50),
            "95th" => Some(Metric::P95),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Metric::Height => "Height (cm)",
            Metric::P50 => "50th",
            Metric::P95 => "95th",
        }
    }
}

#[derive(Debug, Default)]
struct RawGroup {
    height: Option<Vec<Option<f64>>>,
    p50: Option<Vec<Option<f64>>>,
    p95: Option<Vec<Option<f64>>>,
}

impl RawGroup {
    fn slot(&mut self, metric: Metric) -> &mut Option<Vec<Option<f64>>> {
        match metric {
            Metric::Height => &mut self.height,
            Metric::P50 => &mut self.p50,
            Metric::P95 => &mut self.p95,
        }
    }
}

pub fn parse_reference_csv(
    path: &Path,
    sex: Sex,
    bp_type: BpType,
) -> Result<ReferenceTable, StandardsError> {
    let bytes = std::fs::read(path).map_err(|e| StandardsError::io(path, e))?;
    let source = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string());
    parse_reference_reader(bytes.as_slice(), &source, sex, bp_type).map_err(|e| match e {
        StandardsError::Csv { message, .. } => StandardsError::Csv {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })
}

/// Parse a reference table from any reader. `source` names the table in
/// error messages.
pub fn parse_reference_reader<R: Read>(
    reader: R,
    source: &str,
    sex: Sex,
    bp_type: BpType,
) -> Result<ReferenceTable, StandardsError> {
    let csv_error = |message: String| StandardsError::Csv {
        path: source.into(),
        message,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(e.to_string()))?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let position = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let age_idx = position(AGE_COLUMN)
        .ok_or_else(|| StandardsError::invalid_table(source, format!("missing {AGE_COLUMN} column")))?;
    let data_idx = position(DATA_COLUMN)
        .ok_or_else(|| StandardsError::invalid_table(source, format!("missing {DATA_COLUMN} column")))?;
    let band_columns: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != age_idx && *idx != data_idx)
        .map(|(idx, label)| (idx, label.as_str()))
        .collect();
    if band_columns.is_empty() {
        return Err(StandardsError::invalid_table(source, "no height band columns"));
    }

    let mut raw: BTreeMap<u8, RawGroup> = BTreeMap::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| csv_error(e.to_string()))?;
        let row_number = line + 2;
        let data = record.get(data_idx).unwrap_or("");
        let Some(metric) = Metric::parse(data) else {
            debug!(table = source, row = row_number, data, "skipping unused metric row");
            continue;
        };
        let age = parse_age(record.get(age_idx).unwrap_or(""))
            .map_err(|message| StandardsError::invalid_table(source, format!("row {row_number}: {message}")))?;

        let mut values = Vec::with_capacity(band_columns.len());
        for (idx, label) in &band_columns {
            let cell = record.get(*idx).unwrap_or("");
            let value = parse_cell(cell).map_err(|message| {
                StandardsError::invalid_table(
                    source,
                    format!("row {row_number} column '{label}': {message}"),
                )
            })?;
            values.push(value);
        }

        let slot = raw.entry(age).or_default().slot(metric);
        if slot.is_some() {
            return Err(StandardsError::invalid_table(
                source,
                format!("age {age} has more than one '{}' row", metric.as_str()),
            ));
        }
        *slot = Some(values);
    }

    let mut groups = Vec::with_capacity(raw.len());
    for (age, group) in raw {
        groups.push(build_group(source, age, group, &band_columns)?);
    }
    ReferenceTable::new(sex, bp_type, source, groups)
}

fn build_group(
    source: &str,
    age: u8,
    group: RawGroup,
    band_columns: &[(usize, &str)],
) -> Result<AgeGroup, StandardsError> {
    let missing = |metric: Metric| {
        StandardsError::invalid_table(
            source,
            format!("age {age} is missing the '{}' row", metric.as_str()),
        )
    };
    let heights = group.height.ok_or_else(|| missing(Metric::Height))?;
    let p50 = group.p50.ok_or_else(|| missing(Metric::P50))?;
    let p95 = group.p95.ok_or_else(|| missing(Metric::P95))?;

    let mut bands = Vec::new();
    for (pos, (_, label)) in band_columns.iter().enumerate() {
        // An empty height cell means the band does not exist for this age.
        let Some(height_cm) = heights[pos] else {
            continue;
        };
        let (Some(bp_50), Some(bp_95)) = (p50[pos], p95[pos]) else {
            return Err(StandardsError::invalid_table(
                source,
                format!("age {age} band '{label}' has a height but no 50th/95th value"),
            ));
        };
        bands.push(HeightBand::new(*label, height_cm, bp_50, bp_95));
    }
    AgeGroup::new(age, bands).map_err(|message| StandardsError::invalid_table(source, message))
}

fn parse_age(raw: &str) -> Result<u8, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("invalid age '{raw}'"))?;
    if value.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&value) {
        return Err(format!("age '{raw}' is not a whole number of years"));
    }
    Ok(value as u8)
}

fn parse_cell(raw: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| format!("'{trimmed}' is not a number"))?;
    if !value.is_finite() {
        return Err(format!("'{trimmed}' is not a finite number"));
    }
    Ok(Some(value))
}
