//! Dispersion measures
//!
//! Contains:
//! - Arithmetic mean
//! - Population variance about an arbitrary centre
//! - Coefficient-of-variation confidence score

use crate::{MathError, Result};

/// Confidence assigned when there is no dispersion at all
pub const MAX_CONFIDENCE: f64 = 100.0;

/// Confidence assigned when dispersion cannot be normalized
pub const MIN_CONFIDENCE: f64 = 0.0;

/// Arithmetic mean of the values
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Mean requires at least one value".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance `Σ(v - centre)² / n`.
///
/// The centre does not have to be the mean of `values`; the forecasting
/// engine measures spread around a weighted mean.
pub fn population_variance_about(values: &[f64], centre: f64) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Variance requires at least one value".to_string(),
        ));
    }
    if !centre.is_finite() {
        return Err(MathError::InvalidInput(format!(
            "Centre must be finite, got {}",
            centre
        )));
    }

    let sum_sq: f64 = values.iter().map(|v| (v - centre).powi(2)).sum();

    Ok(sum_sq / values.len() as f64)
}

/// Confidence score in `[0, 100]` from the coefficient of variation.
///
/// `100 - (std_dev / |reference|) * 50`, clamped. Zero dispersion always
/// scores 100; a zero reference with non-zero dispersion scores 0.
pub fn cv_confidence(reference: f64, std_dev: f64) -> f64 {
    if std_dev == 0.0 {
        return MAX_CONFIDENCE;
    }
    if reference == 0.0 || !reference.is_finite() || !std_dev.is_finite() {
        return MIN_CONFIDENCE;
    }

    let score = MAX_CONFIDENCE - (std_dev / reference.abs()) * 50.0;
    score.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}
