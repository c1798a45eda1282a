#![deny(unsafe_code)]

pub mod classify;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod screening;

pub use classify::{ELEVATED_PERCENTILE, HYPERTENSION_PERCENTILE, classify};
pub use distribution::{ReferenceDistribution, Z_95, sigma_from_anchors};
pub use engine::{PercentileEngine, compute_percentile};
pub use error::{ErrorKind, PercentileError, Result};
pub use screening::{
    ChartPoint, REFERENCE_LINES, ReferenceLine, ScreeningReport, ScreeningRequest, screen,
};
