//! Weighting schemes for combining analog observations
//!
//! Contains:
//! - Harmonic recency weights (1, 1/2, 1/3, ...)
//! - Weighted arithmetic mean

use crate::{MathError, Result};

/// Harmonic decay weights for `count` observations ordered most recent first.
///
/// The observation at rank `r` (0-based) receives weight `1 / (r + 1)`.
///
/// ```
/// use climate_math::harmonic_weights;
///
/// let weights = harmonic_weights(3);
/// assert_eq!(weights, vec![1.0, 0.5, 1.0 / 3.0]);
/// ```
pub fn harmonic_weights(count: usize) -> Vec<f64> {
    (0..count).map(|rank| 1.0 / (rank as f64 + 1.0)).collect()
}

/// Weighted arithmetic mean `Σ(v·w) / Σw`.
///
/// Weights are normalized before accumulation. Constant input returns that
/// value exactly.
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Weighted mean requires at least one value".to_string(),
        ));
    }
    if values.len() != weights.len() {
        return Err(MathError::InvalidInput(format!(
            "Values length ({}) doesn't match weights length ({})",
            values.len(),
            weights.len()
        )));
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(MathError::InvalidInput(
            "Weights must be finite and non-negative".to_string(),
        ));
    }

    let total_weight: f64 = weights.iter().sum();
    if total_weight <= 0.0 {
        return Err(MathError::InvalidInput(
            "Sum of weights must be greater than zero".to_string(),
        ));
    }

    let first = values[0];
    if values.iter().all(|v| *v == first) {
        return Ok(first);
    }

    Ok(values
        .iter()
        .zip(weights)
        .map(|(v, w)| v * (w / total_weight))
        .sum())
}
