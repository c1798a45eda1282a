//! One form submission: both readings of one child, plus what the chart
//! needs to draw them.

use pbp_model::{BpStatus, BpType, PercentileResult, Sex, Subject};
use pbp_standards::ReferenceTableStore;
use serde::{Deserialize, Serialize};

use crate::engine::PercentileEngine;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningRequest {
    pub sex: Sex,
    pub age_years: f64,
    pub height_cm: f64,
    pub systolic_mmhg: f64,
    pub diastolic_mmhg: f64,
}

impl ScreeningRequest {
    /// The systolic and diastolic queries, in that order.
    pub fn subjects(&self) -> Result<[Subject; 2]> {
        Ok([
            Subject::new(
                self.sex,
                BpType::Systolic,
                self.age_years,
                self.height_cm,
                self.systolic_mmhg,
            )?,
            Subject::new(
                self.sex,
                BpType::Diastolic,
                self.age_years,
                self.height_cm,
                self.diastolic_mmhg,
            )?,
        ])
    }
}

/// Horizontal guide drawn across the percentile chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub percentile: f64,
    pub label: &'static str,
}

pub const REFERENCE_LINES: [ReferenceLine; 3] = [
    ReferenceLine {
        percentile: 50.0,
        label: "50th",
    },
    ReferenceLine {
        percentile: 90.0,
        label: "90th",
    },
    ReferenceLine {
        percentile: 95.0,
        label: "95th",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub age_years: f64,
    pub percentile: f64,
    pub bp_type: &'static str,
    pub bp_value_mmhg: f64,
    pub status: &'static str,
    pub color: &'static str,
}

impl ChartPoint {
    fn new(age_years: f64, result: &PercentileResult) -> Self {
        Self {
            age_years,
            percentile: result.percentile,
            bp_type: result.bp_type.display_label(),
            bp_value_mmhg: result.bp_value_mmhg,
            status: result.status.label(),
            color: result.status.chart_color(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    pub request: ScreeningRequest,
    pub systolic: PercentileResult,
    pub diastolic: PercentileResult,
    pub points: Vec<ChartPoint>,
    pub reference_lines: Vec<ReferenceLine>,
}

impl ScreeningReport {
    pub fn results(&self) -> [&PercentileResult; 2] {
        [&self.systolic, &self.diastolic]
    }

    /// The more severe of the two statuses.
    pub fn overall_status(&self) -> BpStatus {
        self.systolic.status.max(self.diastolic.status)
    }

    /// Distinct statuses present, in severity order.
    pub fn statuses(&self) -> Vec<BpStatus> {
        let mut statuses: Vec<BpStatus> = self.results().iter().map(|r| r.status).collect();
        statuses.sort();
        statuses.dedup();
        statuses
    }
}

pub fn screen(store: &ReferenceTableStore, request: &ScreeningRequest) -> Result<ScreeningReport> {
    let engine = PercentileEngine::new(store);
    let [systolic_subject, diastolic_subject] = request.subjects()?;
    let systolic = engine.compute_percentile(&systolic_subject)?;
    let diastolic = engine.compute_percentile(&diastolic_subject)?;
    let points = vec![
        ChartPoint::new(request.age_years, &systolic),
        ChartPoint::new(request.age_years, &diastolic),
    ];
    Ok(ScreeningReport {
        request: request.clone(),
        systolic,
        diastolic,
        points,
        reference_lines: REFERENCE_LINES.to_vec(),
    })
}
