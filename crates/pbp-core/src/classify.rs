use pbp_model::BpStatus;

/// Percentiles above this are at least Elevated.
pub const ELEVATED_PERCENTILE: f64 = 90.0;
/// Percentiles above this are Hypertension.
pub const HYPERTENSION_PERCENTILE: f64 = 95.0;

/// Map a percentile to its status bucket. A value exactly on a threshold
/// stays in the lower-severity bucket.
pub fn classify(percentile: f64) -> BpStatus {
    if percentile <= ELEVATED_PERCENTILE {
        BpStatus::Normal
    } else if percentile <= HYPERTENSION_PERCENTILE {
        BpStatus::Elevated
    } else {
        BpStatus::Hypertension
    }
}
