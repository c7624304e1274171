//! Seasonal window extraction
//!
//! Selects the historical observations that are analogous to a target date:
//! same calendar month, and a day-of-month within a fixed distance of the
//! target's. Day numbers are compared directly, so the window never reaches
//! into the neighbouring month.

use crate::data::{valid_observations, TargetDate, VariableSeries};
use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default half-width of the seasonal window in days
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// A historical observation falling inside the seasonal window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowedObservation {
    pub date: NaiveDate,
    pub value: f64,
}

/// Seasonal window extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonalWindow {
    half_width_days: u32,
}

impl Default for SeasonalWindow {
    fn default() -> Self {
        Self {
            half_width_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl SeasonalWindow {
    /// Create a window reaching `half_width_days` either side of the target day
    pub fn new(half_width_days: u32) -> Result<Self> {
        if half_width_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window half-width must be positive".to_string(),
            ));
        }
        Ok(Self { half_width_days })
    }

    pub fn half_width_days(&self) -> u32 {
        self.half_width_days
    }

    /// Whether a date falls inside the window around `target`
    pub fn contains(&self, date: NaiveDate, target: &TargetDate) -> bool {
        date.month() == target.month() && date.day().abs_diff(target.day()) <= self.half_width_days
    }

    /// Extract the windowed observations of one variable, ascending by date
    pub fn extract(&self, series: &VariableSeries, target: &TargetDate) -> Vec<WindowedObservation> {
        let mut observations: Vec<WindowedObservation> = valid_observations(series)
            .filter(|(date, _)| self.contains(*date, target))
            .map(|(date, value)| WindowedObservation { date, value })
            .collect();

        observations.sort_by_key(|obs| obs.date);

        debug!(
            raw = series.len(),
            matched = observations.len(),
            month = target.month(),
            day = target.day(),
            "Extracted seasonal window"
        );

        observations
    }
}
