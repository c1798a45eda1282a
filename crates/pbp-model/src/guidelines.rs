//! Follow-up recommendations for each status bucket.
//!
//! Static data from the pediatric hypertension screening guideline the
//! dashboard renders under the chart. Nothing here is computed.

use serde::Serialize;

use crate::enums::BpStatus;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GuidelineEntry {
    pub status: BpStatus,
    pub threshold: &'static str,
    pub actions: &'static [&'static str],
}

const NORMAL_ACTIONS: &[&str] = &[
    "No additional action is needed",
    "BP should be rechecked at the next routine well-child care visit",
];

const ELEVATED_ACTIONS: &[&str] = &[
    "Lifestyle interventions (nutrition, sleep, physical activity) should be initiated",
    "BP should be rechecked by auscultatory measurement in 6 months",
    "If BP remains elevated at 6 months, check upper and lower extremity BP and repeat lifestyle measures",
    "If BP is still elevated after 12 months from initial measurement, order ambulatory blood pressure monitoring along with diagnostic evaluation, and consider subspecialty referral",
];

const HYPERTENSION_ACTIONS: &[&str] = &[
    "If symptomatic, refer to emergency department immediately for evaluation and treatment",
    "If asymptomatic, initiate lifestyle interventions",
    "BP should be rechecked by auscultatory measurement in 1-2 weeks",
    "If it remains classified as hypertension at 1-2 weeks, check upper and lower extremity BP, and recheck BP in 3 months by auscultation with consideration for nutrition/weight management referral",
    "If BP continues to be classified as hypertension after 3 visits, order ambulatory blood pressure monitoring along with diagnostic evaluation, and initiate treatment with consideration for subspecialty referral",
];

impl BpStatus {
    /// Percentile band wording used in the guideline table header.
    pub fn threshold_label(&self) -> &'static str {
        match self {
            BpStatus::Normal => "<90th percentile",
            BpStatus::Elevated => "\u{2265}90th to <95th percentile",
            BpStatus::Hypertension => "\u{2265}95th percentile",
        }
    }

    pub fn recommended_actions(&self) -> &'static [&'static str] {
        match self {
            BpStatus::Normal => NORMAL_ACTIONS,
            BpStatus::Elevated => ELEVATED_ACTIONS,
            BpStatus::Hypertension => HYPERTENSION_ACTIONS,
        }
    }

    pub fn guideline(&self) -> GuidelineEntry {
        GuidelineEntry {
            status: *self,
            threshold: self.threshold_label(),
            actions: self.recommended_actions(),
        }
    }
}

/// The full guideline table in severity order.
pub fn guideline_table() -> Vec<GuidelineEntry> {
    BpStatus::ALL.iter().map(BpStatus::guideline).collect()
}
