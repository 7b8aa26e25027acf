//! Significance testing against the decoupled null distribution
//!
//! The null distribution of decoupled statistics is reduced to a z-score
//! and a two-tailed p-value under a normal approximation. A null
//! distribution with zero spread cannot support a p-value; that case is
//! reported in-band as an undefined marker rather than a spurious number.

use decouple_core::{Error, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// Significance summary of an original statistic against a null distribution
#[derive(Debug, Clone, PartialEq)]
pub struct Significance {
    /// Mean of the null distribution
    pub null_mean: f64,
    /// Sample standard deviation of the null distribution (Bessel corrected)
    pub null_sd: f64,
    /// Standardized deviation of the original statistic, `None` when the
    /// null distribution is degenerate
    pub z_score: Option<f64>,
    /// Two-tailed p-value under the normal approximation, `None` when the
    /// null distribution is degenerate
    pub p_value: Option<f64>,
}

impl Significance {
    /// Whether the null distribution had zero spread
    pub fn is_degenerate(&self) -> bool {
        self.p_value.is_none()
    }

    /// The `(z_score, p_value)` pair, or an error for a degenerate null
    ///
    /// For callers that treat an undefined p-value as a failure rather
    /// than an in-band marker.
    pub fn require_defined(&self) -> Result<(f64, f64)> {
        match (self.z_score, self.p_value) {
            (Some(z), Some(p)) => Ok((z, p)),
            _ => Err(Error::DegenerateDistribution(
                "null standard deviation is zero; p-value is undefined".to_string(),
            )),
        }
    }
}

/// Standardize an original statistic against a null distribution
///
/// `null_sd` uses the Bessel correction (divide by B-1). When the null
/// standard deviation is zero or non-finite, or fewer than two null
/// samples exist, the z-score and p-value are reported as `None` rather
/// than letting NaN flow into downstream arithmetic. The p-value is
/// `2 * (1 - Phi(|z|))`, clamped into [0, 1] to absorb floating-point
/// overshoot at extreme z-scores.
pub fn two_tailed_significance(original_stat: f64, distribution: &[f64]) -> Result<Significance> {
    let b = distribution.len();
    if b == 0 {
        return Err(Error::InsufficientData {
            expected: 1,
            actual: 0,
        });
    }

    let null_mean = distribution.iter().sum::<f64>() / b as f64;

    if b < 2 {
        return Ok(Significance {
            null_mean,
            null_sd: 0.0,
            z_score: None,
            p_value: None,
        });
    }

    let variance = distribution
        .iter()
        .map(|&v| (v - null_mean).powi(2))
        .sum::<f64>()
        / (b - 1) as f64;
    let null_sd = variance.sqrt();

    // Zero spread, or a non-finite null sample poisoning the moments;
    // either way there is nothing meaningful to standardize against
    if null_sd == 0.0 || !null_sd.is_finite() {
        return Ok(Significance {
            null_mean,
            null_sd,
            z_score: None,
            p_value: None,
        });
    }

    let z = (original_stat - null_mean) / null_sd;
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| Error::Computation(format!("Failed to create normal distribution: {e}")))?;
    let p = (2.0 * (1.0 - normal.cdf(z.abs()))).clamp(0.0, 1.0);

    Ok(Significance {
        null_mean,
        null_sd,
        z_score: Some(z),
        p_value: Some(p),
    })
}
