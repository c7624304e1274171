//! Forecast pipeline tying the window, predictor and trend stages together

use crate::catalog::VariableCatalog;
use crate::config::OutlookConfig;
use crate::data::{HistoricalSeries, TargetDate, VariableSeries};
use crate::distribution::DistributionSynthesizer;
use crate::error::{ForecastError, Result};
use crate::models::{HarmonicWeightedPredictor, Prediction, SeasonalPredictor};
use crate::trend::{aggregate_trend, TrendPoint};
use crate::window::SeasonalWindow;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Everything derived for one forecast request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlookReport {
    /// Date the outlook was computed for
    pub target: TargetDate,
    /// Predictions keyed by parameter code; variables without data are absent
    pub predictions: BTreeMap<String, Prediction>,
    /// Yearly target-month means keyed by parameter code
    pub trends: BTreeMap<String, Vec<TrendPoint>>,
}

impl OutlookReport {
    pub fn prediction(&self, code: &str) -> Option<&Prediction> {
        self.predictions.get(code)
    }

    pub fn trend(&self, code: &str) -> Option<&[TrendPoint]> {
        self.trends.get(code).map(Vec::as_slice)
    }

    /// True when no variable could be predicted
    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}

/// Seasonal analog forecaster
#[derive(Debug, Clone)]
pub struct SeasonalForecaster<P: SeasonalPredictor = HarmonicWeightedPredictor> {
    window: SeasonalWindow,
    predictor: P,
    catalog: VariableCatalog,
}

impl SeasonalForecaster {
    /// Build the default forecaster from configuration
    pub fn from_config(config: &OutlookConfig) -> Result<Self> {
        config.validate()?;

        let window = SeasonalWindow::new(config.window_days)?;
        let synthesizer = DistributionSynthesizer::new(config.distribution_samples)?;

        Ok(Self::new(
            window,
            HarmonicWeightedPredictor::new(synthesizer),
            config.catalog.clone(),
        ))
    }
}

impl Default for SeasonalForecaster {
    fn default() -> Self {
        Self::new(
            SeasonalWindow::default(),
            HarmonicWeightedPredictor::default(),
            VariableCatalog::default(),
        )
    }
}

impl<P: SeasonalPredictor> SeasonalForecaster<P> {
    pub fn new(window: SeasonalWindow, predictor: P, catalog: VariableCatalog) -> Self {
        Self {
            window,
            predictor,
            catalog,
        }
    }

    pub fn catalog(&self) -> &VariableCatalog {
        &self.catalog
    }

    pub fn window(&self) -> &SeasonalWindow {
        &self.window
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Forecast every catalog variable
    pub fn forecast(&self, series: &HistoricalSeries, target: &TargetDate) -> Result<OutlookReport> {
        let codes = self.catalog.codes();
        self.forecast_variables(series, target, &codes)
    }

    /// Forecast a subset of catalog variables
    pub fn forecast_variables(
        &self,
        series: &HistoricalSeries,
        target: &TargetDate,
        codes: &[&str],
    ) -> Result<OutlookReport> {
        if let Some(unknown) = codes.iter().find(|code| self.catalog.get(code).is_none()) {
            return Err(ForecastError::InvalidParameter(format!(
                "Parameter '{}' is not in the variable catalog",
                unknown
            )));
        }

        let mut predictions = BTreeMap::new();
        let mut trends = BTreeMap::new();
        let mut skipped = Vec::new();

        for &code in codes {
            let Some(values) = series.parameter(code) else {
                debug!(code, "No observations supplied");
                skipped.push(code);
                continue;
            };

            match self.predict_variable(values, target) {
                Ok(Some(prediction)) => {
                    debug!(
                        code,
                        value = prediction.value,
                        confidence = prediction.confidence,
                        samples = prediction.samples,
                        "Predicted variable"
                    );
                    predictions.insert(code.to_string(), prediction);
                }
                Ok(None) => {
                    debug!(code, "No seasonal matches");
                    skipped.push(code);
                }
                Err(e) => {
                    warn!(code, error = %e, "Prediction failed, skipping variable");
                    skipped.push(code);
                }
            }

            let trend = aggregate_trend(values, target);
            if !trend.is_empty() {
                trends.insert(code.to_string(), trend);
            }
        }

        info!(
            date = %target,
            model = self.predictor.name(),
            predicted = predictions.len(),
            skipped = ?skipped,
            "Seasonal outlook computed"
        );

        Ok(OutlookReport {
            target: *target,
            predictions,
            trends,
        })
    }

    /// Window and predict a single variable's observations
    pub fn predict_variable(
        &self,
        values: &VariableSeries,
        target: &TargetDate,
    ) -> Result<Option<Prediction>> {
        let observations = self.window.extract(values, target);
        self.predictor.predict(&observations)
    }
}
