//! Point-prediction models over seasonal-window observations

use crate::distribution::DistributionPoint;
use crate::error::Result;
use crate::window::WindowedObservation;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod weighted;

pub use weighted::HarmonicWeightedPredictor;

/// Uncertainty band around a prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRange {
    pub min: f64,
    pub max: f64,
}

/// Forecast for a single variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Point estimate
    pub value: f64,
    /// Heuristic confidence in `[0, 100]`
    pub confidence: f64,
    /// `value ± std_dev`
    pub range: PredictionRange,
    /// Spread of the matched observations
    pub std_dev: f64,
    /// Number of matched observations
    pub samples: usize,
    /// Synthesized curve for charts
    pub distribution: Vec<DistributionPoint>,
}

impl Prediction {
    /// Width of the uncertainty band (`2·std_dev`)
    pub fn range_width(&self) -> f64 {
        self.range.max - self.range.min
    }
}

/// Model turning windowed observations into a prediction
pub trait SeasonalPredictor: Debug + Send + Sync {
    /// Predict from the observations; `Ok(None)` when there is nothing to predict from
    fn predict(&self, observations: &[WindowedObservation]) -> Result<Option<Prediction>>;

    /// Get the name of the model
    fn name(&self) -> &str;
}
