//! Recency-weighted seasonal analog predictor

use crate::distribution::DistributionSynthesizer;
use crate::error::{ForecastError, Result};
use crate::models::{Prediction, PredictionRange, SeasonalPredictor};
use crate::window::WindowedObservation;
use climate_math::{cv_confidence, harmonic_weights, population_variance_about, weighted_mean};
use std::cmp::Reverse;

/// Harmonic recency-weighted mean of seasonal analogs.
///
/// Observations are ranked most recent first and weighted `1/(rank+1)`.
/// Spread is the unweighted population variance around the weighted mean.
#[derive(Debug, Clone)]
pub struct HarmonicWeightedPredictor {
    /// Name of the model
    name: String,
    /// Curve generator for the prediction's distribution
    synthesizer: DistributionSynthesizer,
}

impl Default for HarmonicWeightedPredictor {
    fn default() -> Self {
        Self::new(DistributionSynthesizer::default())
    }
}

impl HarmonicWeightedPredictor {
    pub fn new(synthesizer: DistributionSynthesizer) -> Self {
        Self {
            name: "Harmonic Weighted Analog".to_string(),
            synthesizer,
        }
    }
}

impl SeasonalPredictor for HarmonicWeightedPredictor {
    fn predict(&self, observations: &[WindowedObservation]) -> Result<Option<Prediction>> {
        if observations.is_empty() {
            return Ok(None);
        }

        let mut ranked = observations.to_vec();
        ranked.sort_by_key(|obs| Reverse(obs.date));

        let values: Vec<f64> = ranked.iter().map(|obs| obs.value).collect();
        let weights = harmonic_weights(values.len());

        let predicted = weighted_mean(&values, &weights)?;
        let std_dev = population_variance_about(&values, predicted)?.sqrt();
        if !std_dev.is_finite() {
            return Err(ForecastError::DataError(format!(
                "Spread of {} analogs is not representable",
                values.len()
            )));
        }
        let confidence = cv_confidence(predicted, std_dev);

        Ok(Some(Prediction {
            value: predicted,
            confidence,
            range: PredictionRange {
                min: predicted - std_dev,
                max: predicted + std_dev,
            },
            std_dev,
            samples: values.len(),
            distribution: self.synthesizer.synthesize(predicted, std_dev)?,
        }))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn obs(year: i32, day: u32, value: f64) -> WindowedObservation {
        WindowedObservation {
            date: NaiveDate::from_ymd_opt(year, 3, day).unwrap(),
            value,
        }
    }

    #[test]
    fn test_empty_input_has_no_prediction() {
        let predictor = HarmonicWeightedPredictor::default();
        assert!(predictor.predict(&[]).unwrap().is_none());
    }

    #[test]
    fn test_most_recent_gets_full_weight() {
        // Ascending input; the 2023 value ranks first
        let observations = [obs(2021, 10, 10.0), obs(2022, 10, 20.0), obs(2023, 10, 40.0)];
        let prediction = HarmonicWeightedPredictor::default()
            .predict(&observations)
            .unwrap()
            .unwrap();

        // (40*1 + 20/2 + 10/3) / (1 + 1/2 + 1/3)
        let expected = (40.0 + 10.0 + 10.0 / 3.0) / (1.0 + 0.5 + 1.0 / 3.0);
        assert_relative_eq!(prediction.value, expected, epsilon = 1e-12);
        assert_eq!(prediction.samples, 3);
    }

    #[test]
    fn test_variance_is_unweighted_about_weighted_mean() {
        let observations = [obs(2022, 1, 10.0), obs(2023, 1, 20.0)];
        let prediction = HarmonicWeightedPredictor::default()
            .predict(&observations)
            .unwrap()
            .unwrap();

        let mean = (20.0 + 10.0 * 0.5) / 1.5;
        let variance = ((10.0_f64 - mean).powi(2) + (20.0_f64 - mean).powi(2)) / 2.0;
        assert_relative_eq!(prediction.std_dev, variance.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(prediction.range.min, mean - variance.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(prediction.range.max, mean + variance.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(prediction.range_width(), 2.0 * prediction.std_dev, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_values_are_fully_confident() {
        let observations = [obs(2022, 1, 2.0), obs(2023, 1, 2.0), obs(2023, 2, 2.0)];
        let prediction = HarmonicWeightedPredictor::default()
            .predict(&observations)
            .unwrap()
            .unwrap();

        assert_relative_eq!(prediction.value, 2.0);
        assert_eq!(prediction.std_dev, 0.0);
        assert_eq!(prediction.confidence, 100.0);
        assert_eq!(prediction.distribution.len(), 1);
    }

    #[test]
    fn test_zero_mean_with_spread_has_no_confidence() {
        // Weighted mean of [-1 (2023), 2 (2022)] = (-1 + 1) / 1.5 = 0
        let observations = [obs(2022, 1, 2.0), obs(2023, 1, -1.0)];
        let prediction = HarmonicWeightedPredictor::default()
            .predict(&observations)
            .unwrap()
            .unwrap();

        assert_relative_eq!(prediction.value, 0.0, epsilon = 1e-12);
        assert!(prediction.std_dev > 0.0);
        assert_eq!(prediction.confidence, 0.0);
        assert_eq!(prediction.distribution.len(), 50);
    }

    #[test]
    fn test_unrepresentable_spread_is_an_error() {
        let observations = [obs(2024, 15, -1.7e308), obs(2025, 15, 1.7e308)];
        let result = HarmonicWeightedPredictor::default().predict(&observations);
        assert!(matches!(result, Err(ForecastError::DataError(_))));
    }
}
