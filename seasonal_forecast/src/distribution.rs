//! Gaussian curve synthesis for forecast charts

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, Normal};

/// Default number of points on the synthesized curve
pub const DEFAULT_SAMPLE_COUNT: usize = 50;

/// Probability assigned to the single point of a zero-spread curve
pub const SPIKE_PROBABILITY: f64 = 100.0;

/// One point of a synthesized distribution curve.
///
/// `probability` is the density scaled by 100 for chart readability; the
/// points do not sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionPoint {
    pub value: f64,
    pub probability: f64,
}

/// Discretizes a normal density over `mean ± 2·std_dev`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionSynthesizer {
    sample_count: usize,
}

impl Default for DistributionSynthesizer {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

impl DistributionSynthesizer {
    pub fn new(sample_count: usize) -> Result<Self> {
        if sample_count == 0 {
            return Err(ForecastError::InvalidParameter(
                "Distribution sample count must be positive".to_string(),
            ));
        }
        Ok(Self { sample_count })
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Evaluate the curve.
    ///
    /// Points start at `mean - 2·std_dev` and advance by `4·std_dev / n`, so
    /// the last point sits one step short of `mean + 2·std_dev`. A zero (or
    /// non-finite) spread yields a single spike at the mean.
    pub fn synthesize(&self, mean: f64, std_dev: f64) -> Result<Vec<DistributionPoint>> {
        if !mean.is_finite() {
            return Err(ForecastError::InvalidParameter(format!(
                "Distribution mean must be finite, got {}",
                mean
            )));
        }
        if std_dev < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Standard deviation must be non-negative, got {}",
                std_dev
            )));
        }
        if std_dev == 0.0 || !std_dev.is_finite() {
            return Ok(vec![DistributionPoint {
                value: mean,
                probability: SPIKE_PROBABILITY,
            }]);
        }

        let normal = Normal::new(mean, std_dev)
            .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;

        let start = mean - 2.0 * std_dev;
        let step = 4.0 * std_dev / self.sample_count as f64;

        Ok((0..self.sample_count)
            .map(|i| {
                let value = start + i as f64 * step;
                DistributionPoint {
                    value,
                    probability: normal.pdf(value) * 100.0,
                }
            })
            .collect())
    }
}
