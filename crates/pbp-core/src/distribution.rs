//! Gaussian reference distribution fitted from two published quantiles.

use statrs::distribution::{ContinuousCDF, Normal};

/// z-score of the 95th percentile of the standard normal distribution.
pub const Z_95: f64 = 1.645;

/// Standard deviation implied by the 50th and 95th percentile anchors.
pub fn sigma_from_anchors(bp_50: f64, bp_95: f64) -> f64 {
    (bp_95 - bp_50) / Z_95
}

/// Normal distribution centred on the 50th percentile anchor.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceDistribution {
    median: f64,
    sigma: f64,
    normal: Normal,
}

impl ReferenceDistribution {
    /// Fit from the anchors. Fails when the anchors do not describe a proper
    /// distribution (95th not above 50th, or non-finite values).
    pub fn from_anchors(bp_50: f64, bp_95: f64) -> Result<Self, String> {
        let sigma = sigma_from_anchors(bp_50, bp_95);
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(format!(
                "degenerate distribution: 50th={bp_50}, 95th={bp_95} gives sigma={sigma}"
            ));
        }
        let normal = Normal::new(bp_50, sigma).map_err(|e| e.to_string())?;
        Ok(Self {
            median: bp_50,
            sigma,
            normal,
        })
    }

    pub fn median(&self) -> f64 {
        self.median
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn z_score(&self, value: f64) -> f64 {
        (value - self.median) / self.sigma
    }

    /// Percentile rank of `value`, in `[0, 100]`.
    pub fn percentile(&self, value: f64) -> f64 {
        self.normal.cdf(value) * 100.0
    }
}
